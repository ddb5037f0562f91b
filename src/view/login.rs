use colored::Colorize;

/// The logged-out screen. `notice` is the last login or load failure, shown
/// in red above the sign-in hint.
pub fn render(notice: Option<&str>) -> String {
    let mut out = format!(
        "{}\n{}\n\n{}\n",
        "Spotify gender analyser".bold(),
        "Do you actually listen to any women? Let's find out.".italic(),
        "Analyses your 50 most played artists and shows the gender split among them."
    );

    if let Some(notice) = notice {
        out.push('\n');
        out.push_str(&notice.red().to_string());
        out.push('\n');
    }

    out.push_str(&format!(
        "\nRun {} to sign in with Spotify.\n",
        "topgender login".bold()
    ));
    out
}
