use std::fs;

fn main() {
    // Validate default config at compile time: it must parse and carry its header/footer lines
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for section in ["letterhead", "footer"] {
        let lines = table
            .get(section)
            .and_then(|value| value.get("lines"))
            .and_then(|value| value.as_array());
        let Some(lines) = lines else {
            panic!("default_config.toml: [[{section}.lines]] missing");
        };
        for line in lines {
            if line.get("text").and_then(|text| text.as_str()).is_none() {
                panic!("default_config.toml: every {section} line needs a `text`");
            }
        }
    }
}
