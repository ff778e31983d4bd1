use minijinja::{Environment, context};
use serde::Serialize;
use thiserror::Error;

use super::table::{Cell, TableLayout};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Visual weight of a single-line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Loading,
    Error,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "placeholder",
            Self::Loading => "loading",
            Self::Error => "error-message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub meta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteItem {
    pub content: String,
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub active: bool,
}

#[derive(Serialize)]
struct ActionView<'a> {
    label: &'a str,
    action: &'a str,
    key: &'a str,
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct CellView<'a> {
    text: Option<&'a str>,
    actions: Vec<ActionView<'a>>,
}

const ROWS: &str = "rows.html";
const PLACEHOLDER_ROW: &str = "placeholder_row.html";
const LIST: &str = "list.html";
const PLACEHOLDER_ITEM: &str = "placeholder_item.html";
const NOTES: &str = "notes.html";
const OPTIONS: &str = "options.html";
const MESSAGE: &str = "message.html";
const NAV: &str = "nav.html";

const TEMPLATES: &[(&str, &str)] = &[
    (
        ROWS,
        "{% for row in rows %}<tr>\
         {% for cell in row %}<td>\
         {% if cell.actions %}{% for a in cell.actions %}\
         <button class=\"action-btn\" data-action=\"{{ a.action }}\" data-key=\"{{ a.key }}\"\
         {% if a.name %} data-name=\"{{ a.name }}\"{% endif %}>{{ a.label }}</button>\
         {% endfor %}{% else %}{{ cell.text }}{% endif %}\
         </td>{% endfor %}\
         </tr>\n{% endfor %}",
    ),
    (
        PLACEHOLDER_ROW,
        "<tr><td colspan=\"{{ colspan }}\" class=\"{{ class }}\">{{ message }}</td></tr>",
    ),
    (
        LIST,
        "{% for item in items %}<li>\
         {% if item.url %}<a href=\"{{ item.url }}\" target=\"_blank\">{{ item.title }}</a>\
         {% else %}<strong>{{ item.title }}</strong>{% endif %}\
         {% if item.description %}<p>{{ item.description }}</p>{% endif %}\
         {% if item.meta %}<span class=\"meta\">{{ item.meta }}</span>{% endif %}\
         </li>\n{% endfor %}",
    ),
    (
        PLACEHOLDER_ITEM,
        "<li class=\"{{ class }}\">{{ message }}</li>",
    ),
    (
        NOTES,
        "{% for note in notes %}<li class=\"note\"><p>{{ note.content }}</p>\
         <span class=\"meta\">{{ note.meta }}</span></li>\n{% endfor %}",
    ),
    (
        OPTIONS,
        "{% for option in options %}<option value=\"{{ option.value }}\">{{ option.label }}</option>\n{% endfor %}",
    ),
    (MESSAGE, "<p class=\"{{ class }}\">{{ message }}</p>"),
    (
        NAV,
        "{% for link in links %}<a href=\"{{ link.href }}\"{% if link.active %} class=\"active\"{% endif %}>{{ link.label }}</a>\n{% endfor %}",
    ),
];

/// Template-backed renderer. Every template is `.html`, so values are
/// auto-escaped.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, RenderError> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }

    /// Table body rows, or the layout's placeholder row when `rows` is empty.
    pub fn table<T>(&self, layout: &TableLayout<T>, rows: &[T]) -> Result<String, RenderError> {
        if rows.is_empty() {
            return self.placeholder_row(layout.colspan(), layout.empty_message(), Tone::Info);
        }

        let cells: Vec<Vec<Cell>> = rows.iter().map(|row| layout.cells(row)).collect();
        let views: Vec<Vec<CellView<'_>>> = cells
            .iter()
            .map(|row| row.iter().map(cell_view).collect())
            .collect();
        self.render(ROWS, context! { rows => views })
    }

    pub fn placeholder_row(&self, colspan: usize, message: &str, tone: Tone) -> Result<String, RenderError> {
        self.render(
            PLACEHOLDER_ROW,
            context! { colspan => colspan, message => message, class => tone.class() },
        )
    }

    /// List items, or one placeholder item when empty.
    pub fn list(&self, items: &[ListItem], empty_message: &str) -> Result<String, RenderError> {
        if items.is_empty() {
            return self.placeholder_item(empty_message, Tone::Info);
        }
        self.render(LIST, context! { items => items })
    }

    pub fn placeholder_item(&self, message: &str, tone: Tone) -> Result<String, RenderError> {
        self.render(PLACEHOLDER_ITEM, context! { message => message, class => tone.class() })
    }

    pub fn notes(&self, notes: &[NoteItem], empty_message: &str) -> Result<String, RenderError> {
        if notes.is_empty() {
            return self.placeholder_item(empty_message, Tone::Info);
        }
        self.render(NOTES, context! { notes => notes })
    }

    pub fn options(&self, options: &[SelectOption]) -> Result<String, RenderError> {
        self.render(OPTIONS, context! { options => options })
    }

    pub fn message(&self, message: &str, tone: Tone) -> Result<String, RenderError> {
        self.render(MESSAGE, context! { message => message, class => tone.class() })
    }

    pub fn nav(&self, links: &[NavLink]) -> Result<String, RenderError> {
        self.render(NAV, context! { links => links })
    }
}

fn cell_view(cell: &Cell) -> CellView<'_> {
    match cell {
        Cell::Text(text) => CellView {
            text: Some(text),
            actions: Vec::new(),
        },
        Cell::Actions(actions) => CellView {
            text: None,
            actions: actions
                .iter()
                .map(|a| ActionView {
                    label: a.label,
                    action: a.action,
                    key: &a.key,
                    name: a.name.as_deref(),
                })
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RowAction;

    struct Advisee {
        id: &'static str,
        name: &'static str,
    }

    fn layout() -> TableLayout<Advisee> {
        TableLayout::<Advisee>::new("No advisees assigned to you.")
            .column("Name", |a| Cell::text(a.name))
            .column("Actions", |a| {
                Cell::Actions(vec![
                    RowAction::new("Details", "details", a.id),
                    RowAction::new("Results", "results", a.id).with_name(Some(a.name)),
                ])
            })
    }

    #[test]
    fn test_rows_carry_keys() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .table(&layout(), &[Advisee { id: "42", name: "Ada Obi" }])
            .unwrap();
        assert_eq!(html.matches("<tr>").count(), 1);
        assert!(html.contains("<td>Ada Obi</td>"));
        assert!(html.contains("data-action=\"results\" data-key=\"42\" data-name=\"Ada Obi\""));
    }

    #[test]
    fn test_empty_table_renders_placeholder() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.table(&layout(), &[]).unwrap();
        assert_eq!(
            html,
            "<tr><td colspan=\"2\" class=\"placeholder\">No advisees assigned to you.</td></tr>"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .table(&layout(), &[Advisee { id: "1", name: "<b>x</b>" }])
            .unwrap();
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_list_placeholder() {
        let renderer = Renderer::new().unwrap();
        assert_eq!(
            renderer.list(&[], "No resources available.").unwrap(),
            "<li class=\"placeholder\">No resources available.</li>"
        );
    }
}
