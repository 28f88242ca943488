//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes canned replies, error messages and the weather/dictionary templates.

pub const GREETING: &str = "Hello! Thanks for chatting with me. How can I help you?";
pub const HELLO_BACK: &str = "Hello you there!";
pub const CLARIFY: &str = "Please explain yourself in more comprehensible expressions";
pub const CUSTOM_PLACEHOLDER: &str = "This will be some useful information in the future!";
pub const SERVER_FAILURE: &str = "Something must be wrong with the server. Please try again";

pub fn your_id(user_id: &str, chat_id: &str) -> String {
    format!("Your id is: {user_id}\nChat id: {chat_id}")
}

pub fn word_header(word: &str) -> String {
    format!("Word: {word}\n\n")
}

pub fn word_sense(part_of_speech: &str, definition: &str) -> String {
    format!("\nPart of speech: {part_of_speech}\nDefinition: {definition}\n")
}

pub fn word_example(example: &str) -> String {
    format!("Example: {example}\n")
}

pub fn audio_file_name(word: &str) -> String {
    format!("{word}.mp3")
}

pub fn current_weather(
    city: &str,
    region: &str,
    country: &str,
    condition: &str,
    temp: &str,
    wind: &str,
) -> String {
    format!(
        "Right now in {city}, {region}, {country} it is {condition} with a temperature of {temp}°C and wind of {wind} km/h."
    )
}

pub fn forecast_header(city: &str, region: &str, country: &str) -> String {
    format!("Forecast for {city}, {region}, {country}:\n")
}

pub fn forecast_day(
    date: &str,
    max: &str,
    min: &str,
    avg: &str,
    wind: &str,
    condition: &str,
) -> String {
    format!(
        "{date}: max {max}°C, min {min}°C, avg {avg}°C, wind up to {wind} km/h, {condition}\n"
    )
}
