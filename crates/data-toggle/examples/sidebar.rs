//! Sidebar demo
//!
//! Run with `RUST_LOG=data_toggle=info cargo run -p data-toggle --example sidebar`

use data_toggle::{on_toggle, DataToggle, ToggleOptions};
use toggle_dom::Document;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let doc = Document::new();
    let body = doc.body().ok_or_else(|| anyhow::anyhow!("document has no body"))?;

    let sidebar = doc.create_element("aside");
    doc.set_attribute(sidebar, "class", "sidebar")?;
    doc.append_child(body, sidebar)?;

    let button = doc.create_element("button");
    doc.set_attribute(button, "data-toggle", "open")?;
    doc.set_attribute(button, "data-toggle-element", ".sidebar")?;
    doc.append_child(body, button)?;

    let theme = doc.create_element("a");
    doc.set_attribute(theme, "href", "#")?;
    doc.set_attribute(theme, "data-toggle", "theme-dark")?;
    doc.append_child(body, theme)?;

    on_toggle(&doc, |event| {
        println!(
            "{} -> {} on {:?}",
            event.class_name,
            if event.active { "on" } else { "off" },
            event.target
        );
    });

    let toggle = DataToggle::new(&doc, ToggleOptions::new().debug(true).debounce_delay(50));

    doc.click(button);
    doc.click(button);
    doc.advance_time(50);
    println!("sidebar classes: {}", doc.class_name(sidebar));

    let followed = doc.click(theme);
    doc.advance_time(50);
    println!("link default followed: {followed}");
    println!("dark theme active: {}", toggle.is_active("theme-dark", None));

    toggle.destroy();
    Ok(())
}
