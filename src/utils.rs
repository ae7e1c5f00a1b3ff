//! Formatting helpers shared by the terminal view and the CLI.

use crate::models::SpeciesRecord;

/// Format a Pokémon `name` into a human-friendly form.
///
/// Examples: `mr-mime` -> `Mr Mime`, `ho_oh` -> `Ho Oh`.
pub fn format_name(name: &str) -> String {
    let replaced = name.replace(['-', '_'], " ");
    let parts: Vec<String> = replaced
        .split_whitespace()
        .map(|w| {
            let mut chs = w.chars();
            match chs.next() {
                None => String::new(),
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chs.as_str().to_lowercase()
                }
            }
        })
        .collect();
    parts.join(" ")
}

/// Game flavor text carries hard line breaks and form feeds; flatten them.
pub fn clean_flavor_text(raw: &str) -> String {
    raw.replace(['\n', '\u{c}'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn text_to_lines(s: &str, width: usize) -> Vec<String> {
    // Greedy wrap; a single word longer than `width` gets its own line.
    let mut lines = vec![];
    let mut current = String::new();
    for word in s.split_whitespace() {
        if current.len() + word.len() + 1 > width && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Plain-text facts about a species, one per line.
pub fn species_facts(p: &SpeciesRecord) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(generation) = &p.generation {
        lines.push(format!("Generation: {}", format_name(&generation.name)));
    }
    if let Some(habitat) = &p.habitat {
        lines.push(format!("Habitat: {}", format_name(&habitat.name)));
    }
    if let Some(happiness) = p.base_happiness {
        lines.push(format!("Base happiness: {happiness}"));
    }
    match (p.is_legendary, p.is_mythical) {
        (true, true) => lines.push("Legendary, Mythical".to_string()),
        (true, false) => lines.push("Legendary".to_string()),
        (false, true) => lines.push("Mythical".to_string()),
        (false, false) => {}
    }
    if let Some(form) = p.form() {
        let fmt_opt = |v: Option<u32>| v.map_or_else(|| "?".to_string(), |n| n.to_string());
        lines.push(format!(
            "Height: {}  Weight: {}",
            fmt_opt(form.height),
            fmt_opt(form.weight)
        ));
        let abilities = form.ability_names();
        if !abilities.is_empty() {
            let names: Vec<String> = abilities.iter().map(|a| format_name(a)).collect();
            lines.push(format!("Abilities: {}", names.join(", ")));
        }
        lines.push(format!(
            "Level-up moves: {}",
            form.level_up_moves.nodes.len()
        ));
        lines.push(format!("Found in {} places", form.encounter_count()));
        if !form.fire_red_items.is_empty() {
            let items: Vec<String> = form
                .fire_red_items
                .iter()
                .map(|held| match held.rarity {
                    Some(r) => format!("{} ({}%)", format_name(&held.item.name), r),
                    None => format_name(&held.item.name),
                })
                .collect();
            lines.push(format!("FireRed items: {}", items.join(", ")));
        }
    }
    lines
}
