//! Defect taxonomy: categories, reasons, and message templates
//!
//! The two-level category -> reason mapping the classification prompt offers.
//! Templates substitute `{tag}` and, where a reason asks for one, a
//! `{terminals}` list. The taxonomy is plain data consumed by value; rendered
//! text is frozen into the annotation at creation time, so editing this table
//! never rewrites already-logged defects.

/// A single defect reason with its message template
#[derive(Debug, Clone, PartialEq)]
pub struct Reason {
    pub id: String,
    pub template: String,
    /// Whether the template needs a terminal list supplied at prompt time
    pub needs_terminals: bool,
}

impl Reason {
    fn plain(id: &str) -> Self {
        Self {
            id: id.to_string(),
            template: format!("{{tag}} {id}"),
            needs_terminals: false,
        }
    }

    fn with_terminals(id: &str, template: &str) -> Self {
        Self {
            id: id.to_string(),
            template: template.to_string(),
            needs_terminals: true,
        }
    }
}

/// A defect category grouping related reasons
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub reasons: Vec<Reason>,
}

/// The classification a prompt returns for one defect
#[derive(Debug, Clone, PartialEq)]
pub struct DefectChoice {
    pub category_id: String,
    pub reason_id: String,
    pub terminals: Option<Vec<String>>,
}

/// Static nested category -> reason mapping
#[derive(Debug, Clone, PartialEq)]
pub struct DefectTaxonomy {
    categories: Vec<Category>,
}

impl DefectTaxonomy {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The standard inspection taxonomy for circuit cabinets
    pub fn standard() -> Self {
        Self::new(vec![
            Category {
                id: "Wrong Wiring".to_string(),
                reasons: vec![
                    Reason::plain("Color Code Wrong"),
                    Reason::plain("Cross Section Wrong"),
                    Reason::plain("Wire Missing"),
                    Reason::plain("Ferrule Direction Wrong"),
                ],
            },
            Category {
                id: "Fuse".to_string(),
                reasons: vec![
                    Reason::plain("Fuse Missing"),
                    Reason::plain("Wrong Fuse Rating"),
                    Reason::plain("Fuse Orientation Wrong"),
                ],
            },
            Category {
                id: "Component".to_string(),
                reasons: vec![
                    Reason::plain("Missing Component"),
                    Reason::plain("Wrong Component Type"),
                    Reason::plain("Wrong Material Installed"),
                ],
            },
            Category {
                id: "General".to_string(),
                reasons: vec![
                    Reason::plain("Assembly Error"),
                    Reason::plain("Labeling Error"),
                    Reason::with_terminals(
                        "Connection Loose",
                        "{tag} Connection Loose at terminals {terminals}",
                    ),
                    Reason::plain("Other"),
                ],
            },
        ])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn reason(&self, category_id: &str, reason_id: &str) -> Option<&Reason> {
        self.category(category_id)?
            .reasons
            .iter()
            .find(|r| r.id == reason_id)
    }

    /// Render the message for a reason, substituting tag and terminals
    ///
    /// Returns None when the reason requires a terminal list and none (or an
    /// empty one) was supplied.
    pub fn render_text(
        &self,
        reason: &Reason,
        tag: &str,
        terminals: Option<&[String]>,
    ) -> Option<String> {
        let mut text = reason.template.replace("{tag}", tag);
        if reason.needs_terminals {
            let terminals = terminals.filter(|t| !t.is_empty())?;
            text = text.replace("{terminals}", &terminals.join(", "));
        }
        Some(text)
    }
}

impl Default for DefectTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}
