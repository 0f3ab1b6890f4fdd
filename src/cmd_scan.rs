//! `scan` and `fill` subcommand handlers.

use std::path::Path;

use tracing::info;

use formpilot_config::Config;
use formpilot_core::{explain, match_field, Injector};
use formpilot_dom::Page;
use formpilot_protocols::ProfileStore;
use formpilot_scanner::values::{extract, needs_value};
use formpilot_scanner::{Assembler, FieldRecord};

use crate::cmd_profile::open_store;
use crate::pages::load_page;

const LABEL_WIDTH: usize = 40;

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

/// List the fields of a page.
pub(crate) async fn cmd_scan(
    config: &Config,
    page: &Path,
    format: &str,
    with_explain: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = load_page(page)?;
    let pass = Assembler::new(config.scanner.clone()).scan_document(&mut doc);
    info!(page = %page.display(), fields = pass.len(), "Scanned page");

    let profile = if with_explain {
        Some(open_store(config).await?.get_profile().await?)
    } else {
        None
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&pass)?);
        return Ok(());
    }

    if pass.is_empty() {
        println!("No fields found.");
        return Ok(());
    }

    println!(
        "{:<16} {:<14} {:<width$} {}",
        "ID",
        "TYPE",
        "LABEL",
        if with_explain { "RULE" } else { "VALUE" },
        width = LABEL_WIDTH
    );
    println!("{}", "-".repeat(90));
    for field in &pass {
        let last = match &profile {
            Some(profile) => explain(field, profile)
                .map(|m| format!("{} ({}) -> {}", m.rule, m.domain, m.value))
                .unwrap_or_else(|| "-".to_string()),
            None => field.value.clone(),
        };
        println!(
            "{:<16} {:<14} {:<width$} {}",
            field.id,
            field.kind.as_str(),
            clip(&field.label, LABEL_WIDTH),
            last,
            width = LABEL_WIDTH
        );
    }

    let stats: Vec<String> = pass
        .stats()
        .iter()
        .map(|(kind, count)| format!("{}={}", kind, count))
        .collect();
    println!("\n{} fields ({})", pass.len(), stats.join(", "));
    Ok(())
}

/// Fill every empty field the profile can answer, once.
pub(crate) async fn cmd_fill(config: &Config, page: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let page_handle = Page::new(load_page(page)?);
    let pass = Assembler::new(config.scanner.clone()).scan(&page_handle);
    let profile = open_store(config).await?.get_profile().await?;
    let injector = Injector::new(&config.agent);

    let pending: Vec<&FieldRecord> = page_handle.read(|doc| {
        pass.iter()
            .filter(|f| {
                doc.resolve(&f.node)
                    .is_ok_and(|id| needs_value(doc, id, &f.kind))
            })
            .collect()
    });

    let mut changed = 0;
    for field in pending {
        let Some(value) = match_field(field, &profile).filter(|v| !v.is_empty()) else {
            continue;
        };
        if !injector.fill(&page_handle, &field.node, &value) {
            println!("✗ {} (could not set '{}')", field.label, value);
            continue;
        }
        let now = page_handle.read(|doc| {
            doc.resolve(&field.node)
                .map(|id| extract(doc, id, &field.kind))
                .unwrap_or_default()
        });
        if now != field.value {
            changed += 1;
            println!("✓ {}: '{}' -> '{}'", field.label, field.value, now);
        }
    }

    println!("\n{} of {} fields changed.", changed, pass.len());
    Ok(())
}
