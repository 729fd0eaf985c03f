//! Static catalog of selectable Gemini models.

/// A selectable model: identifier plus a short display description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub description: &'static str,
}

/// The catalog, in display order. The controller renders every entry and
/// the web surface uses the same list for its dropdown.
pub fn model_options() -> Vec<ModelOption> {
    vec![
        ModelOption {
            id: "gemini-2.5-flash-lite",
            description: "Latest fast, multi-modal model.",
        },
        ModelOption {
            id: "gemini-2.5-flash",
            description: "Latest stable flash model.",
        },
        ModelOption {
            id: "gemini-2.5-pro",
            description: "Latest stable pro model.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_three_models_in_display_order() {
        let options = model_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].id, "gemini-2.5-flash-lite");
        assert_eq!(options[1].id, "gemini-2.5-flash");
        assert_eq!(options[2].id, "gemini-2.5-pro");
    }

    #[test]
    fn catalog_has_no_duplicate_identifiers() {
        let options = model_options();
        let ids: HashSet<&str> = options.iter().map(|option| option.id).collect();
        assert_eq!(ids.len(), options.len());
    }

    #[test]
    fn every_model_has_a_description() {
        for option in model_options() {
            assert!(!option.description.is_empty(), "{} lacks a description", option.id);
        }
    }
}
