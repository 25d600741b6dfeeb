use jiff::{SpanRelativeTo, civil::Date};

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(millis) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_millis(millis.abs()));
    }

    Err(String::from("Invalid duration"))
}

pub fn parse_date(input: &str) -> Result<Date, String> {
    input
        .trim()
        .parse::<Date>()
        .map_err(|error| format!("Invalid date, expected YYYY-MM-DD: {error}"))
}
