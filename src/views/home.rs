use super::{escape, page};

const SEARCH_SCRIPT: &str = r#"<script>
const form = document.getElementById("search");
form.addEventListener("submit", async (event) => {
    event.preventDefault();
    const body = new URLSearchParams({ name: form.elements.name.value });
    const response = await fetch("/similarity", { method: "POST", body });
    const text = await response.text();
    const results = document.getElementById("results");
    results.replaceChildren();
    for (const title of text.split("---")) {
        const item = document.createElement("li");
        item.textContent = title;
        results.appendChild(item);
    }
});
</script>"#;

/// Search page with an autocomplete list of every catalog title
pub fn render_home(suggestions: &[String]) -> String {
    let options: String = suggestions
        .iter()
        .map(|title| format!("<option value=\"{}\"></option>", escape(title)))
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<h1>Movie Recommender</h1>
<form id="search" method="post" action="/similarity">
    <input name="name" list="movies" placeholder="Enter a movie title" autocomplete="off" required>
    <button type="submit">Recommend</button>
</form>
<datalist id="movies">
{options}
</datalist>
<ul id="results"></ul>
{script}"#,
        options = options,
        script = SEARCH_SCRIPT
    );

    page("Movie Recommender", &body)
}
