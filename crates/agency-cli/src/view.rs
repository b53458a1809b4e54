//! Read-only projection of controller state, and a plain-text renderer for it.
//!
//! The projection is rebuilt from the raw records on every call: group, pick
//! the selected niche, sort. Nothing is cached.

use std::fmt::Write as _;

use agency_core::{group_by_niche, sort_records, AgencyRecord, RecordKey, SortMode};

use crate::controller::UiState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NicheItem<'a> {
    pub name: &'a str,
    pub count: usize,
    /// Whether this is the selected niche.
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgencyItem<'a> {
    pub key: RecordKey,
    pub record: &'a AgencyRecord,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub niches: Vec<NicheItem<'a>>,
    pub selected_niche: Option<&'a str>,
    pub sort_mode: SortMode,
    pub menu_visible: bool,
    pub loading: bool,
    /// The selected niche's agencies, in display order.
    pub agencies: Vec<AgencyItem<'a>>,
}

/// Builds the view for `records` under `state`.
#[must_use]
pub fn project<'a>(records: &'a [AgencyRecord], state: &'a UiState, loading: bool) -> View<'a> {
    let grouped = group_by_niche(records);
    let selected = state.selected_niche.as_deref();

    let niches = grouped
        .iter()
        .map(|(name, entries)| NicheItem {
            name,
            count: entries.len(),
            active: selected == Some(name),
        })
        .collect();

    let mut entries = selected
        .and_then(|niche| grouped.get(niche))
        .map(<[_]>::to_vec)
        .unwrap_or_default();
    sort_records(&mut entries, state.sort_mode);

    let agencies = entries
        .into_iter()
        .map(|entry| AgencyItem {
            key: entry.key,
            record: entry.record,
            expanded: state.expanded == Some(entry.key),
        })
        .collect();

    View {
        niches,
        selected_niche: selected,
        sort_mode: state.sort_mode,
        menu_visible: state.menu_visible,
        loading,
        agencies,
    }
}

/// Renders `view` as plain text for non-interactive output.
#[must_use]
pub fn render_text(view: &View<'_>) -> String {
    let mut out = String::new();

    if view.menu_visible {
        let _ = writeln!(out, "Niche Menu");
        for niche in &view.niches {
            let marker = if niche.active { '>' } else { ' ' };
            let _ = writeln!(out, "  {marker} {} ({})", display_niche(niche.name), niche.count);
        }
        let options: Vec<String> = SortMode::ALL
            .iter()
            .map(|mode| {
                if *mode == view.sort_mode {
                    format!("[{}]", mode.label())
                } else {
                    mode.label().to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "Sort by: {}", options.join(" "));
        out.push('\n');
    }

    let _ = writeln!(out, "Agencies by Niche");
    if view.loading {
        let _ = writeln!(out, "Loading\u{2026}");
        return out;
    }
    let Some(niche) = view.selected_niche else {
        return out;
    };
    let _ = writeln!(out, "== {} ==", display_niche(niche));
    for item in &view.agencies {
        let record = item.record;
        let marker = if item.expanded { '-' } else { '+' };
        let _ = writeln!(out, "{marker} {} \u{2b50}{}", record.name, record.reviews);
        if item.expanded {
            for line in detail_lines(record) {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
    out
}

/// Detail lines shown under an expanded record.
#[must_use]
pub fn detail_lines(record: &AgencyRecord) -> Vec<String> {
    vec![
        record.description.clone(),
        format!("Pricing: {}", record.pricing),
        format!("Reviews: {}", record.reviews),
        format!("Phone: {} <{}>", record.phone_number, record.tel_link()),
        format!("Email: {} <{}>", record.email, record.mailto_link()),
    ]
}

/// Label for a niche; the empty niche still needs something visible.
#[must_use]
pub fn display_niche(name: &str) -> &str {
    if name.is_empty() {
        "(uncategorised)"
    } else {
        name
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
