use ffi::{create_creature_internal, creature_stats_internal, list_creatures_internal};

fn main() {
    println!("FFI Version: compendium-ffi 0.1.0");

    let goblin = r#"{"name": "Goblin", "type": "humanoid", "ac": 15, "characteristics": [8, 14, 10, 10, 8, 8]}"#;

    // Pure stats computation, no vault
    match creature_stats_internal(goblin) {
        Ok(stats) => println!("goblin stats: {}", stats),
        Err(e) => println!("error: {}", e),
    }

    // Vault-backed round trip in a scratch directory
    let dir = std::env::temp_dir().join("compendium-ffi-demo");
    let root = dir.to_string_lossy();
    match create_creature_internal(&root, goblin) {
        Ok(stored) => println!("created {} ({})", stored.name, stored.id),
        Err(e) => println!("error: {}", e),
    }
    println!(
        "creatures in vault: {}",
        list_creatures_internal(&root).len()
    );
}
