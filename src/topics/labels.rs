// Angular tick labels for the spider plot.
//
// Topic names are often long phrases. On a polar axis they need line breaks
// to stay readable, so a "break label" is the topic name wrapped into short
// lines joined with `<br>` (the line separator the figure renderer and
// Plotly both understand).

/// Line separator used inside break labels.
pub const LINE_BREAK: &str = "<br>";

/// Default wrap width (in characters) for generated break labels.
pub const DEFAULT_WRAP_WIDTH: usize = 12;

/// Wrap a topic name into lines of at most `width` characters.
///
/// Words are never split: a single word longer than `width` sits on its own
/// line.
pub fn break_label(name: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in name.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join(LINE_BREAK)
}

/// Generate break labels for every topic name.
pub fn default_breaks(topics: &[String]) -> Vec<String> {
    topics
        .iter()
        .map(|t| break_label(t, DEFAULT_WRAP_WIDTH))
        .collect()
}
