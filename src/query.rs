//! The species details query sent to the PokeAPI GraphQL endpoint.
//!
//! Only `$name` is a variable. The language, game version and move-learn
//! method filters are baked into the document; changing them means editing
//! the template below.

pub const OPERATION_NAME: &str = "pokemon_details";

pub const FLAVOR_TEXT_LANGUAGE: &str = "en";
pub const GAME_VERSION: &str = "firered";
pub const MOVE_LEARN_METHOD: &str = "level-up";

/// Name searched by the terminal view on startup.
pub const EXAMPLE_NAME: &str = "charizard";

pub const POKEMON_DETAILS_QUERY: &str = r#"query pokemon_details($name: String) {
  species: pokemonspecies(where: {name: {_eq: $name}}) {
    name
    base_happiness
    is_legendary
    is_mythical
    generation: generation {
      name
    }
    habitat: pokemonhabitat {
      name
    }
    pokemon: pokemons_aggregate(limit: 1) {
      nodes {
        height
        name
        id
        weight
        abilities: pokemonabilities_aggregate {
          nodes {
            ability: ability {
              name
            }
          }
        }
        stats: pokemonstats {
          base_stat
          stat: stat {
            name
          }
        }
        types: pokemontypes {
          slot
          type: type {
            name
          }
        }
        levelUpMoves: pokemonmoves_aggregate(where: {movelearnmethod: {name: {_eq: "level-up"}}}, distinct_on: move_id) {
          nodes {
            move: move {
              name
            }
            level
          }
        }
        foundInAsManyPlaces: encounters_aggregate {
          aggregate {
            count
          }
        }
        fireRedItems: pokemonitems(where: {version: {name: {_eq: "firered"}}}) {
          item {
            name
            cost
          }
          rarity
        }
      }
    }
    flavorText: pokemonspeciesflavortexts(where: {language: {name: {_eq: "en"}}, version: {name: {_eq: "firered"}}}) {
      flavor_text
    }
  }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_only_the_name_variable() {
        assert!(POKEMON_DETAILS_QUERY.starts_with(&format!("query {OPERATION_NAME}($name: String)")));
        assert_eq!(POKEMON_DETAILS_QUERY.matches('$').count(), 2);
    }

    #[test]
    fn embeds_fixed_filters() {
        assert!(POKEMON_DETAILS_QUERY
            .contains(&format!("language: {{name: {{_eq: \"{FLAVOR_TEXT_LANGUAGE}\"}}}}")));
        assert_eq!(
            POKEMON_DETAILS_QUERY
                .matches(&format!("_eq: \"{GAME_VERSION}\""))
                .count(),
            2
        );
        assert!(POKEMON_DETAILS_QUERY.contains(&format!("_eq: \"{MOVE_LEARN_METHOD}\"")));
        assert!(POKEMON_DETAILS_QUERY.contains("distinct_on: move_id"));
        assert!(POKEMON_DETAILS_QUERY.contains("pokemons_aggregate(limit: 1)"));
    }
}
