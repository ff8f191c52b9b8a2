//! Page templates.
//!
//! The built-in pages are compiled into the binary. Setting `TEMPLATE_DIR`
//! replaces them with `*.html` files loaded from that directory; the
//! directory must provide every name in [`PAGE_TEMPLATES`].

use std::path::Path;

use tera::{Context, Tera};

pub const WELCOME_PAGE: &str = "base_page.html";
pub const TOUR_LIST_PAGE: &str = "list_tours_page.html";
pub const EMPTY_TOUR_LIST_PAGE: &str = "empty_list_tours_page.html";
pub const BOOK_TOUR_PAGE: &str = "book_tour_page.html";
pub const ERROR_PAGE: &str = "error_page.html";

/// Every page the handlers render.
pub const PAGE_TEMPLATES: [&str; 5] = [
    WELCOME_PAGE,
    TOUR_LIST_PAGE,
    EMPTY_TOUR_LIST_PAGE,
    BOOK_TOUR_PAGE,
    ERROR_PAGE,
];

/// Compiled Tera templates for the HTML pages.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// The templates shipped with the crate.
    pub fn embedded() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("../templates/layout.html")),
            (WELCOME_PAGE, include_str!("../templates/base_page.html")),
            (TOUR_LIST_PAGE, include_str!("../templates/list_tours_page.html")),
            (
                EMPTY_TOUR_LIST_PAGE,
                include_str!("../templates/empty_list_tours_page.html"),
            ),
            (BOOK_TOUR_PAGE, include_str!("../templates/book_tour_page.html")),
            (ERROR_PAGE, include_str!("../templates/error_page.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Load every `*.html` file under `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, tera::Error> {
        let glob = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&glob)?;

        let loaded: Vec<&str> = tera.get_template_names().collect();
        if let Some(missing) = PAGE_TEMPLATES.iter().find(|name| !loaded.contains(*name)) {
            return Err(tera::Error::msg(format!(
                "template directory '{}' is missing '{missing}'",
                dir.display()
            )));
        }
        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }
}
