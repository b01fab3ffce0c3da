use serde_json::{Map, Value};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use super::{ServerSettings, SettingsError};

fn stream_error(e: std::io::Error) -> SettingsError {
    SettingsError::io(Path::new("<stdin>"), e)
}

/// Prompt until the answer parses as `T`.
pub fn get_input<T, R, W>(prompt: &str, input: &mut R, output: &mut W) -> Result<T, SettingsError>
where
    T: FromStr,
    T::Err: Display,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", prompt).map_err(stream_error)?;
        output.flush().map_err(stream_error)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(stream_error)? == 0 {
            return Err(SettingsError::InvalidValue(format!(
                "input ended while waiting for '{}'",
                prompt.trim()
            )));
        }

        match line.trim_end_matches(['\r', '\n']).parse::<T>() {
            Ok(value) => return Ok(value),
            Err(e) => {
                writeln!(output, "Unable to parse the value ({}), please try again.", e)
                    .map_err(stream_error)?;
            }
        }
    }
}

/// Ask for the values a new settings file needs.
pub fn prompt_settings<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<ServerSettings, SettingsError> {
    let client_id: String = get_input("Enter the client_id for the app: ", input, output)?;
    let permissions: i64 = get_input("Enter the permissions integer for the app: ", input, output)?;
    let token: String = get_input("Enter the token for the app: ", input, output)?;

    let mut values = Map::new();
    values.insert("client_id".to_string(), Value::String(client_id));
    values.insert("permissions".to_string(), Value::from(permissions));
    values.insert("token".to_string(), Value::String(token));
    Ok(ServerSettings::from_map(values))
}
