use serde::Serialize;

pub fn output_data<T: Serialize>(data: &T, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "yaml" => {
            println!("{}", serde_yaml::to_string(data)?);
        }
        "json" | _ => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

/// Print plain-text sections one after another.
pub fn print_sections<'a, I: IntoIterator<Item = &'a str>>(sections: I) {
    for section in sections {
        println!("{}", section);
    }
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31m❌ Error: {}\x1b[0m", message);
}

pub fn print_warning(message: &str) {
    println!("\x1b[33m⚠️  Warning: {}\x1b[0m", message);
}
