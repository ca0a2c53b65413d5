//! HTML view rendering via `minijinja`.
//!
//! Templates are embedded into the binary with `include_str!` so the views
//! ship with the server and no template directory has to exist at runtime.
//! Rendering is two-step, mirroring the hypermedia contract: the inner
//! template renders first, and for plain navigations the result is wrapped
//! in the page layout; partial-update requests receive the inner fragment
//! as-is for in-place DOM replacement.

use minijinja::{Environment, context};

use crate::error::AppError;

/// Page layout wrapping every full-page response.
const LAYOUT: &str = include_str!("../templates/layout.html");
/// Home page body.
const HOME: &str = include_str!("../templates/home.html");
/// Single event card.
const CARD: &str = include_str!("../templates/card.html");
/// Collection listing (count + card grid).
const EVENTS: &str = include_str!("../templates/events.html");
/// Single event page (card + htmx self-replace demo button).
const EVENT: &str = include_str!("../templates/event.html");
/// Creation form.
const NEW: &str = include_str!("../templates/new.html");
/// Edit form with the method-override field.
const EDIT: &str = include_str!("../templates/edit.html");

/// The template environment for all HTML responses.
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Build the environment with every template registered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Template`] if any embedded template fails to
    /// parse. This is a build defect, not a runtime condition, so it is
    /// surfaced once at startup.
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();

        for (name, source) in [
            ("layout.html", LAYOUT),
            ("home.html", HOME),
            ("card.html", CARD),
            ("events.html", EVENTS),
            ("event.html", EVENT),
            ("new.html", NEW),
            ("edit.html", EDIT),
        ] {
            env.add_template(name, source)
                .map_err(|e| AppError::Template(format!("failed to add {name}: {e}")))?;
        }

        Ok(Self { env })
    }

    /// Render a single template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Template`] if the template is missing or the
    /// render fails.
    pub fn render<S: serde::Serialize>(&self, name: &str, ctx: S) -> Result<String, AppError> {
        self.env
            .get_template(name)
            .map_err(|e| AppError::Template(format!("missing template {name}: {e}")))?
            .render(ctx)
            .map_err(|e| AppError::Template(format!("{name} render failed: {e}")))
    }

    /// Render a template, wrapping it in the page layout unless the
    /// request asked for a partial fragment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Template`] if either render fails.
    pub fn page<S: serde::Serialize>(
        &self,
        name: &str,
        ctx: S,
        partial: bool,
    ) -> Result<String, AppError> {
        let content = self.render(name, ctx)?;
        if partial {
            return Ok(content);
        }
        self.render("layout.html", context! { content })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use bfield_types::{Event, EventId};
    use chrono::Utc;

    use super::*;

    fn sample_event() -> Event {
        Event {
            id: EventId::new(),
            name: String::from("jason"),
            place: Some(String::from("home")),
            thing: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn all_templates_parse() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn full_page_wraps_the_fragment_in_the_layout() {
        let views = Views::new().unwrap();
        let html = views.page("home.html", context! {}, false).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Hypermedia Is Fun!"));
    }

    #[test]
    fn partial_render_omits_the_layout() {
        let views = Views::new().unwrap();
        let html = views.page("home.html", context! {}, true).unwrap();
        assert!(!html.contains("<!DOCTYPE"));
        assert!(html.contains("Hypermedia Is Fun!"));
    }

    #[test]
    fn card_renders_name_and_place() {
        let views = Views::new().unwrap();
        let event = sample_event();
        let id = event.id;
        let html = views.render("card.html", context! { event }).unwrap();
        assert!(html.contains("jason@home"));
        assert!(html.contains(&format!("/events/{id}/edit")));
    }

    #[test]
    fn card_falls_back_when_place_is_missing() {
        let views = Views::new().unwrap();
        let mut event = sample_event();
        event.place = None;
        let html = views.render("card.html", context! { event }).unwrap();
        assert!(html.contains("jason@World"));
    }

    #[test]
    fn events_page_renders_a_card_per_member() {
        let views = Views::new().unwrap();
        let events = vec![sample_event(), sample_event()];
        let html = views
            .render("events.html", context! { count => events.len(), events })
            .unwrap();
        assert!(html.contains("Events 2"));
        assert_eq!(html.matches("class=\"card\"").count(), 2);
    }

    #[test]
    fn edit_form_carries_the_method_override() {
        let views = Views::new().unwrap();
        let event = sample_event();
        let id = event.id;
        let html = views.render("edit.html", context! { event }).unwrap();
        assert!(html.contains("name=\"_method\" value=\"put\""));
        assert!(html.contains(&format!("action=\"/events/{id}\"")));
    }

    #[test]
    fn rendered_values_are_html_escaped() {
        let views = Views::new().unwrap();
        let mut event = sample_event();
        event.name = String::from("<script>alert(1)</script>");
        let html = views.render("card.html", context! { event }).unwrap();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
