//! Circuit inspector command line tool
//!
//! Batch companion to the interactive inspector. Two jobs:
//!
//!   inspector export <source.pdf> <snapshot.json> <output.pdf>
//!       Burn a session snapshot into an annotated copy of the source PDF.
//!
//!   inspector relog <snapshot.json> <log.csv> [--project P] [--order O]
//!                   [--cabinet C] [--inspector NAME]
//!       Rebuild the inspection log from a snapshot. Useful when log appends
//!       failed mid-session and the snapshot is the surviving record.

use std::path::PathBuf;
use std::process::ExitCode;

use inspector_core::snapshot;

fn usage() {
    eprintln!("Usage:");
    eprintln!("  inspector export <source.pdf> <snapshot.json> <output.pdf>");
    eprintln!("  inspector relog <snapshot.json> <log.csv> [--project P] [--order O] [--cabinet C] [--inspector NAME]");
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let result = match args.get(1).map(String::as_str) {
        Some("export") => run_export(&args[2..]),
        Some("relog") => run_relog(&args[2..]),
        _ => {
            usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_export(args: &[String]) -> Result<(), String> {
    let [source, snapshot_path, output] = args else {
        usage();
        return Err("export expects <source.pdf> <snapshot.json> <output.pdf>".to_string());
    };

    let annotations =
        snapshot::read_snapshot(&PathBuf::from(snapshot_path)).map_err(|e| e.to_string())?;
    log::info!("loaded {} annotations from {snapshot_path}", annotations.len());

    inspector_export::export_annotated_pdf(
        &PathBuf::from(source),
        &PathBuf::from(output),
        &annotations,
    )
    .map_err(|e| e.to_string())?;

    println!("Wrote annotated copy to {output}");
    Ok(())
}

fn run_relog(args: &[String]) -> Result<(), String> {
    if args.len() < 2 {
        usage();
        return Err("relog expects <snapshot.json> <log.csv>".to_string());
    }
    let snapshot_path = PathBuf::from(&args[0]);
    let log_path = PathBuf::from(&args[1]);

    let mut project = String::new();
    let mut order = String::new();
    let mut cabinet = String::new();
    let mut inspector = std::env::var("USER").unwrap_or_else(|_| "inspector".to_string());

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--project" => {
                i += 1;
                if i < args.len() {
                    project = args[i].clone();
                }
            }
            "--order" => {
                i += 1;
                if i < args.len() {
                    order = args[i].clone();
                }
            }
            "--cabinet" => {
                i += 1;
                if i < args.len() {
                    cabinet = args[i].clone();
                }
            }
            "--inspector" => {
                i += 1;
                if i < args.len() {
                    inspector = args[i].clone();
                }
            }
            other => {
                usage();
                return Err(format!("unknown option {other}"));
            }
        }
        i += 1;
    }

    let annotations = snapshot::read_snapshot(&snapshot_path).map_err(|e| e.to_string())?;
    let defects: Vec<_> = annotations.iter().filter(|a| a.is_defect()).collect();
    log::info!(
        "snapshot holds {} annotations, {} defects",
        annotations.len(),
        defects.len()
    );

    let mut writer = inspector_log::LogWriter::open(&log_path).map_err(|e| e.to_string())?;
    if !project.is_empty() || !order.is_empty() || !cabinet.is_empty() {
        writer
            .write_header(&project, &order, &cabinet)
            .map_err(|e| e.to_string())?;
    }

    let mut written = 0usize;
    for defect in defects {
        writer.append(defect, &inspector).map_err(|e| e.to_string())?;
        written += 1;
    }

    println!("Appended {written} defect rows to {}", log_path.display());
    Ok(())
}
