//! Property tests for toggle state

use data_toggle::{DataToggle, ToggleError, ToggleOptions};
use proptest::prelude::*;
use toggle_dom::Document;

fn class_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}"
}

proptest! {
    #[test]
    fn toggle_twice_restores_state(name in class_name(), preset in any::<bool>()) {
        let doc = Document::new();
        let html = doc.document_element().unwrap();
        if preset {
            doc.add_class(html, &name).unwrap();
        }
        let toggle = DataToggle::new(&doc, ToggleOptions::new());
        let before = doc.class_name(html);

        toggle.toggle(&name, None);
        prop_assert_eq!(toggle.is_active(&name, None), !preset);
        toggle.toggle(&name, None);
        prop_assert_eq!(doc.class_name(html), before);
    }

    #[test]
    fn try_toggle_reports_new_state(names in prop::collection::vec(class_name(), 1..12)) {
        let doc = Document::new();
        let toggle = DataToggle::new(&doc, ToggleOptions::new());

        for name in &names {
            let active = toggle.try_toggle(name, None).unwrap();
            prop_assert_eq!(toggle.is_active(name, None), active);
        }
    }

    #[test]
    fn blank_names_never_mutate(blank in "[ \t\n]{0,6}") {
        let doc = Document::new();
        let html = doc.document_element().unwrap();
        let toggle = DataToggle::new(&doc, ToggleOptions::new());

        prop_assert_eq!(toggle.try_toggle(&blank, None), Err(ToggleError::InvalidClassName));
        prop_assert_eq!(doc.class_name(html), "");
    }

    #[test]
    fn clicks_match_programmatic_parity(clicks in 0usize..9) {
        let doc = Document::new();
        let html = doc.document_element().unwrap();
        let button = doc.create_element("button");
        doc.set_attribute(button, "data-toggle", "open").unwrap();
        doc.append_child(doc.body().unwrap(), button).unwrap();
        let _toggle = DataToggle::new(&doc, ToggleOptions::new());

        for _ in 0..clicks {
            doc.click(button);
        }
        prop_assert_eq!(doc.has_class(html, "open"), clicks % 2 == 1);
    }
}
