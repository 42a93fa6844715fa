use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Facets, FlatIndexEntry, Item, SITE_LINK_LABEL};
use crate::query::filter::FilterCriteria;
use crate::query::group::{group_by_section, Subsection};
use crate::query::sort::SortMode;
use crate::snapshot::Snapshot;

/// Render query results as a colored terminal report, grouped by section.
pub fn render(
    snapshot: &Snapshot,
    results: &[&FlatIndexEntry],
    criteria: &FilterCriteria,
    sort: SortMode,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    if quiet {
        println!("{}", quiet_line(snapshot, results.len()));
        return Ok(());
    }

    let catalog = &snapshot.catalog;
    let summary = &snapshot.index.summary;

    println!("\n {}", catalog.title.bold());
    if !catalog.description.is_empty() {
        println!(" {}", catalog.description.dimmed());
    }
    println!(" Source: {}\n", snapshot.origin);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<49} │", "SUMMARY".bold());
    println!(" │  {:<49} │", format!("Categories : {:>5}", summary.categories));
    println!(" │  {:<49} │", format!("Tools      : {:>5}", summary.items));
    println!(" │  {:<49} │", format!("Tags       : {:>5}", summary.distinct_tags));
    println!(
        " │  {:<49} │",
        format!("Matching   : {:>5}  (sort: {})", results.len(), sort)
    );
    if !criteria.is_empty() {
        println!(" │  {:<49} │", filters_line(criteria));
    }
    println!(" └────────────────────────────────────────────────────┘\n");

    if snapshot.index.is_empty() {
        println!(" {} The catalog has no tools.\n", "[EMPTY]".yellow().bold());
        return Ok(());
    }
    if results.is_empty() {
        println!(" {} No matching tools.\n", "[EMPTY]".yellow().bold());
        return Ok(());
    }

    for section in group_by_section(catalog, results) {
        println!(
            " {} {} ({})\n",
            "▸".cyan(),
            section.category.bold(),
            section.len()
        );
        for subsection in &section.subsections {
            println!("   {}", subsection.subcategory.italic());
            render_table(subsection, verbose);
            println!();
        }
    }

    if verbose && !catalog.about_links.is_empty() {
        println!(" {}", "About".bold());
        for link in &catalog.about_links {
            println!("   {} {}", link.text, link.url.dimmed());
        }
        println!();
    }

    Ok(())
}

fn render_table(subsection: &Subsection<'_>, verbose: bool) {
    let mut header = vec![
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new("Licenses").add_attribute(Attribute::Bold),
        Cell::new("Languages").add_attribute(Attribute::Bold),
    ];
    if verbose {
        header.push(Cell::new("Tags").add_attribute(Attribute::Bold));
        header.push(Cell::new("Links").add_attribute(Attribute::Bold));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for entry in &subsection.entries {
        let item = &entry.item;
        let mut row = vec![
            Cell::new(&item.name).add_attribute(Attribute::Bold),
            Cell::new(&item.description),
            Cell::new(item.licenses.join(", ")).fg(Color::Green),
            Cell::new(item.languages.join(", ")).fg(Color::Cyan),
        ];
        if verbose {
            row.push(Cell::new(item.tags.join(", ")).fg(Color::DarkGrey));
            row.push(Cell::new(link_list(item)));
        }
        table.add_row(row);
    }

    println!("{}", table);
}

/// Print the filter options a catalog offers.
pub fn render_facets(snapshot: &Snapshot, quiet: bool) {
    let facets = &snapshot.facets;
    if quiet {
        println!("{}", facets_line(facets));
        return;
    }

    println!("\n {}\n", snapshot.catalog.title.bold());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Tools").add_attribute(Attribute::Bold),
        ]);
    for (title, count) in &facets.categories {
        table.add_row(vec![Cell::new(title), Cell::new(count)]);
    }
    println!("{}\n", table);

    println!(" {} {}", "Licenses :".bold(), facets.licenses.join(", ").green());
    println!(" {} {}\n", "Languages:".bold(), facets.languages.join(", ").cyan());
}

fn quiet_line(snapshot: &Snapshot, matched: usize) -> String {
    format!(
        "{}: {}  Matching: {}",
        snapshot.catalog.title, snapshot.index.summary, matched
    )
}

/// Active filters as `key=value` pairs.
fn filters_line(criteria: &FilterCriteria) -> String {
    let mut parts = Vec::new();
    if let Some(category) = &criteria.category {
        parts.push(format!("category={}", category));
    }
    if let Some(license) = &criteria.license {
        parts.push(format!("license={}", license));
    }
    if let Some(language) = &criteria.language {
        parts.push(format!("language={}", language));
    }
    if let Some(kind) = criteria.has {
        parts.push(format!("has={}", kind));
    }
    format!("Filters    : {}", parts.join(" "))
}

fn facets_line(facets: &Facets) -> String {
    format!(
        "Categories: {}  Licenses: {}  Languages: {}",
        facets.categories.len(),
        facets.licenses.len(),
        facets.languages.len()
    )
}

/// Secondary links as `Label <url>` lines; the site link is already the
/// item's primary url and is listed first without a label.
fn link_list(item: &Item) -> String {
    item.links
        .iter()
        .map(|link| {
            if link.label == SITE_LINK_LABEL {
                link.url.clone()
            } else {
                format!("{} <{}>", link.label, link.url)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
