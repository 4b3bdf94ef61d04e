//! Template rendering with Tera

use anyhow::Result;
use tera::{Context, Tera};

/// Template renderer
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a new template renderer with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("search.html", include_str!("../templates/search.html")),
            (
                "components/search_bar.html",
                include_str!("../templates/components/search_bar.html"),
            ),
            (
                "components/place.html",
                include_str!("../templates/components/place.html"),
            ),
            (
                "components/skeleton.html",
                include_str!("../templates/components/skeleton.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with a Tera Context
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::{PlaceRecord, SearchFilters};
    use crate::search::ResultsView;

    fn base_context() -> Context {
        let mut ctx = Context::new();
        ctx.insert("instance_name", "Coffee Places Finder");
        ctx.insert("query", "rotterdam");
        ctx.insert("sid", "s1");
        ctx.insert("sort", "rating");
        ctx.insert("toggle_sort", "name");
        ctx.insert("toggle_href", "/search?q=rotterdam&sort=name");
        ctx.insert("filters", &SearchFilters::default());
        ctx
    }

    #[test]
    fn test_templates_load() {
        assert!(Templates::new().is_ok());
    }

    #[test]
    fn test_results_list_renders_places() {
        let templates = Templates::new().unwrap();
        let places = vec![
            PlaceRecord::new("1", "The Coffee Room", 4.7)
                .with_city("Rotterdam")
                .with_hours("07:30", "17:30")
                .with_tags(["wifi"]),
            PlaceRecord::new("2", "Nameless", 3.0),
        ];
        let view = ResultsView::from_places(places);

        let mut ctx = base_context();
        ctx.insert("result_count", &view.count());
        ctx.insert("view", &view);
        let html = templates.render_with_context("search.html", &ctx).unwrap();

        assert!(html.contains("Found 2 coffee places"));
        assert!(html.contains("The Coffee Room"));
        assert!(html.contains("07:30 - 17:30"));
        assert!(html.contains("Hours not available"));
        assert!(html.contains("4.7"));
    }

    #[test]
    fn test_single_result_is_singular() {
        let templates = Templates::new().unwrap();
        let view = ResultsView::from_places(vec![PlaceRecord::new("1", "Solo", 4.0)]);

        let mut ctx = base_context();
        ctx.insert("result_count", &1);
        ctx.insert("view", &view);
        let html = templates.render_with_context("search.html", &ctx).unwrap();
        assert!(html.contains("Found 1 coffee place</h2>"));
    }

    #[test]
    fn test_error_state() {
        let templates = Templates::new().unwrap();
        let view = ResultsView::Failed {
            message: "places API returned HTTP 500".to_string(),
        };

        let mut ctx = base_context();
        ctx.insert("result_count", &0);
        ctx.insert("view", &view);
        let html = templates.render_with_context("search.html", &ctx).unwrap();
        assert!(html.contains("places API returned HTTP 500"));
        assert!(html.contains("Go back and try again"));
        assert!(!html.contains("No coffee places found"));
    }

    #[test]
    fn test_filters_are_kept_in_the_form() {
        let templates = Templates::new().unwrap();
        let mut ctx = base_context();
        ctx.insert(
            "filters",
            &SearchFilters {
                min_rating: Some(4.5),
                open_after: Some("08:00".to_string()),
                open_before: None,
            },
        );
        ctx.insert("result_count", &0);
        ctx.insert("view", &ResultsView::Empty);
        let html = templates.render_with_context("search.html", &ctx).unwrap();
        assert!(html.contains(r#"value="4.5""#));
        assert!(html.contains(r#"value="08:00""#));
        assert!(html.contains("No coffee places found"));
    }
}
