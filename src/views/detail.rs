use crate::models::{MovieDetails, ReviewSet, SentimentLabel};

use super::{escape, page};

/// Detail page: movie metadata, cast, recommendation cards and labelled reviews
pub fn render_detail(details: &MovieDetails, reviews: &ReviewSet) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        r#"<h1>{title}</h1>
<img class="poster" src="{poster}" alt="{title}">
<p>{overview}</p>
<table>
<tr><th>Rating</th><td>{rating}/10 ({votes} votes)</td></tr>
<tr><th>Genre</th><td>{genres}</td></tr>
<tr><th>Release date</th><td>{release}</td></tr>
<tr><th>Runtime</th><td>{runtime}</td></tr>
<tr><th>Status</th><td>{status}</td></tr>
</table>
"#,
        title = escape(&details.title),
        poster = escape(&details.poster),
        overview = escape(&details.overview),
        rating = escape(&details.rating),
        votes = escape(&details.vote_count),
        genres = escape(&details.genres),
        release = escape(&details.release_date),
        runtime = escape(&details.runtime),
        status = escape(&details.status),
    ));

    if !details.cast.is_empty() {
        body.push_str("<h2>Top cast</h2>\n<div class=\"cards\">\n");
        for member in &details.cast {
            body.push_str(&format!(
                r#"<div class="card" id="cast-{id}">
<img src="{profile}" alt="{name}">
<strong>{name}</strong><br>{character}
<details><summary>Bio</summary><p>Born {birthday} in {place}</p><p>{bio}</p></details>
</div>
"#,
                id = escape(&member.id),
                profile = escape(&member.profile),
                name = escape(&member.name),
                character = escape(&member.character),
                birthday = escape(&member.birthday),
                place = escape(&member.place_of_birth),
                bio = escape(&member.biography),
            ));
        }
        body.push_str("</div>\n");
    }

    body.push_str("<h2>User reviews</h2>\n");
    if reviews.is_empty() {
        body.push_str("<p>No reviews available.</p>\n");
    } else {
        body.push_str("<table>\n<tr><th>Review</th><th>Sentiment</th></tr>\n");
        for review in &reviews.reviews {
            body.push_str(&format!(
                "<tr><td>{}</td><td class=\"{}\">{}</td></tr>\n",
                escape(&review.text),
                label_class(review.label),
                review.label
            ));
        }
        body.push_str("</table>\n");
    }

    if !details.recommendations.is_empty() {
        body.push_str("<h2>Recommended movies</h2>\n<div class=\"cards\">\n");
        for card in &details.recommendations {
            body.push_str(&format!(
                "<div class=\"card\"><img src=\"{poster}\" alt=\"{title}\"><p>{title}</p></div>\n",
                poster = escape(&card.poster),
                title = escape(&card.title),
            ));
        }
        body.push_str("</div>\n");
    }

    page(&details.title, &body)
}

fn label_class(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Good => "good",
        SentimentLabel::Bad => "bad",
        SentimentLabel::Unknown => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CastMember, RecommendationCard, ReviewRecord, ReviewStatus,
    };

    fn details() -> MovieDetails {
        serde_json::from_value(serde_json::json!({
            "title": "Inception",
            "imdb_id": "tt1375666",
            "rating": "8.4",
            "vote_count": "30000",
            "overview": "A thief who steals <secrets>",
        }))
        .unwrap()
    }

    #[test]
    fn test_detail_renders_reviews_with_labels() {
        let reviews = ReviewSet {
            status: ReviewStatus::Fetched,
            reviews: vec![
                ReviewRecord { text: "Loved it".to_string(), label: SentimentLabel::Good },
                ReviewRecord { text: "Meh".to_string(), label: SentimentLabel::Bad },
            ],
        };

        let html = render_detail(&details(), &reviews);
        assert!(html.contains("<h1>Inception</h1>"));
        assert!(html.contains("A thief who steals &lt;secrets&gt;"));
        assert!(html.contains(r#"<tr><td>Loved it</td><td class="good">Good</td></tr>"#));
        assert!(html.contains(r#"<tr><td>Meh</td><td class="bad">Bad</td></tr>"#));
    }

    #[test]
    fn test_detail_unavailable_reviews_render_as_empty() {
        let html = render_detail(&details(), &ReviewSet::unavailable());
        assert!(html.contains("No reviews available."));
    }

    #[test]
    fn test_detail_renders_cast_and_cards() {
        let mut details = details();
        details.cast.push(CastMember {
            id: "6193".to_string(),
            name: "Leonardo DiCaprio".to_string(),
            character: "Cobb".to_string(),
            ..Default::default()
        });
        details.recommendations.push(RecommendationCard {
            title: "Interstellar".to_string(),
            poster: "/i.jpg".to_string(),
        });

        let html = render_detail(&details, &ReviewSet::unavailable());
        assert!(html.contains(r#"id="cast-6193""#));
        assert!(html.contains("<strong>Leonardo DiCaprio</strong><br>Cobb"));
        assert!(html.contains(r#"<img src="/i.jpg" alt="Interstellar">"#));
    }
}
