//! The `smartstart init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create a starter catalog
    std::fs::create_dir_all("catalogs")?;
    let catalog_path = std::path::Path::new("catalogs/starter.toml");
    if catalog_path.exists() {
        println!("catalogs/starter.toml already exists, skipping.");
    } else {
        std::fs::write(catalog_path, STARTER_CATALOG)?;
        println!("Created catalogs/starter.toml");
    }

    // Create an example answer script
    std::fs::create_dir_all("scripts")?;
    let script_path = std::path::Path::new("scripts/example.toml");
    if script_path.exists() {
        println!("scripts/example.toml already exists, skipping.");
    } else {
        std::fs::write(script_path, EXAMPLE_SCRIPT)?;
        println!("Created scripts/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: smartstart validate --catalog catalogs/starter.toml");
    println!("  2. Run: smartstart play --catalog catalogs/starter.toml");
    println!("  3. Or scripted: smartstart simulate --script scripts/example.toml");

    Ok(())
}

const STARTER_CATALOG: &str = r#"# smartstart stimulus catalog

[catalog]
id = "starter"
name = "Starter Catalog"
description = "The default Smart Start screening stimuli"

[[focus]]
target = "🍎"
options = ["🍎", "🐱", "🚗", "🎈", "⭐", "🏠"]
prompt = "Find the red apple!"

[[focus]]
target = "🐶"
options = ["🐶", "🌸", "⚽", "🎯", "🔥", "🎪"]
prompt = "Click on the dog!"

[[focus]]
target = "⭐"
options = ["⭐", "🍌", "🎵", "🌙", "🎨", "🎭"]
prompt = "Where is the star?"

[[focus]]
target = "🚗"
options = ["🚗", "🦋", "🎁", "🌈", "🎸", "🏆"]
prompt = "Find the car!"

[[focus]]
target = "🏠"
options = ["🏠", "🎲", "🎪", "🌺", "🎯", "🎊"]
prompt = "Click the house!"

[[letter]]
target = "A"
options = ["A", "B", "C"]

[[letter]]
target = "B"
options = ["A", "B", "D"]

[[letter]]
target = "C"
options = ["C", "G", "O"]

[[letter]]
target = "D"
options = ["D", "B", "P"]

[[letter]]
target = "E"
options = ["E", "F", "L"]

[[letter]]
target = "F"
options = ["F", "E", "T"]

[[letter]]
target = "G"
options = ["G", "C", "Q"]

[[letter]]
target = "H"
options = ["H", "N", "M"]

[memory]
values = ["🐶", "🐱", "🐸", "🦋"]
"#;

const EXAMPLE_SCRIPT: &str = r#"# smartstart answer script
#
# Unlisted rounds answer correctly; unlisted memory flips are solved
# perfectly once the scripted ones run out.

[script]
seed = 42
think_secs = 2

[answers]
# One wrong focus pick (round 2) and two wrong letter picks.
focus = ["🍎", "🌸"]
letter = ["A", "B", "G", "B"]
# Replay the audio before answering rounds 3 and 4.
letter_repeats = [2, 3]

[memory]
# A couple of exploratory flips before solving the board.
flips = [[1, 2], [3, 4]]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_catalog_parses_clean() {
        let catalog = smartstart_core::parser::parse_catalog_str(
            STARTER_CATALOG,
            std::path::Path::new("starter.toml"),
        )
        .unwrap();
        assert_eq!(catalog.focus.len(), 5);
        assert_eq!(catalog.letter.len(), 8);
        assert_eq!(catalog.pair_count(), 4);
        assert!(smartstart_core::parser::validate_catalog(&catalog).is_empty());
    }
}
