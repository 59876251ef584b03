//! Quick-action forms and their compilation into a method/path pair
//!
//! Each quick action owns a handful of typed fields. Compiling an action
//! yields a [`CompiledRequest`] which is then written into the
//! [`RequestState`] draft. Every query value goes through URL component
//! encoding; optional values that are empty are left out of the query.

use thiserror::Error;

use crate::constants::{DEFAULT_FORM_PATH, DEFAULT_SEARCH_MAX, SEARCH_MAX_RANGE};
use crate::models::{HttpMethod, RequestState};

/// Input errors found while compiling a form
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Case sensitivity for `/search`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchCase {
    #[default]
    Insensitive,
    Sensitive,
}

impl SearchCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCase::Insensitive => "i",
            SearchCase::Sensitive => "sensitive",
        }
    }

    pub fn toggle(&self) -> SearchCase {
        match self {
            SearchCase::Insensitive => SearchCase::Sensitive,
            SearchCase::Sensitive => SearchCase::Insensitive,
        }
    }
}

/// Image format for `/screenshot`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
        }
    }

    pub fn toggle(&self) -> ImageFormat {
        match self {
            ImageFormat::Png => ImageFormat::Jpg,
            ImageFormat::Jpg => ImageFormat::Png,
        }
    }
}

/// Quick actions in selector order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Disks,
    List,
    Search,
    Read,
    ClipboardGet,
    ClipboardPut,
    Screenshot,
    Exit,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::Disks,
        ActionKind::List,
        ActionKind::Search,
        ActionKind::Read,
        ActionKind::ClipboardGet,
        ActionKind::ClipboardPut,
        ActionKind::Screenshot,
        ActionKind::Exit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Disks => "disks",
            ActionKind::List => "list",
            ActionKind::Search => "search",
            ActionKind::Read => "read",
            ActionKind::ClipboardGet => "clipboard-get",
            ActionKind::ClipboardPut => "clipboard-put",
            ActionKind::Screenshot => "screenshot",
            ActionKind::Exit => "exit",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(0)
    }

    pub fn next(&self) -> ActionKind {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> ActionKind {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Editable fields of this action, in display order
    pub fn fields(&self) -> &'static [FormField] {
        match self {
            ActionKind::List => &[FormField::ListPath],
            ActionKind::Search => &[
                FormField::SearchPath,
                FormField::SearchQuery,
                FormField::SearchCase,
                FormField::SearchMax,
            ],
            ActionKind::Read => &[
                FormField::ReadPath,
                FormField::ReadStart,
                FormField::ReadLines,
                FormField::ReadTail,
                FormField::ReadCount,
            ],
            ActionKind::ClipboardPut => &[FormField::ClipboardContent],
            ActionKind::Screenshot => &[FormField::ScreenshotFormat],
            ActionKind::Disks | ActionKind::ClipboardGet | ActionKind::Exit => &[],
        }
    }
}

/// A single field across all quick-action forms
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    ListPath,
    SearchPath,
    SearchQuery,
    SearchCase,
    SearchMax,
    ReadPath,
    ReadStart,
    ReadLines,
    ReadTail,
    ReadCount,
    ClipboardContent,
    ScreenshotFormat,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ListPath | FormField::SearchPath | FormField::ReadPath => "path",
            FormField::SearchQuery => "query",
            FormField::SearchCase => "case",
            FormField::SearchMax => "max",
            FormField::ReadStart => "start",
            FormField::ReadLines => "lines",
            FormField::ReadTail => "tail",
            FormField::ReadCount => "count",
            FormField::ClipboardContent => "content",
            FormField::ScreenshotFormat => "format",
        }
    }

    /// Choice fields are cycled rather than typed into
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FormField::SearchCase | FormField::ReadCount | FormField::ScreenshotFormat
        )
    }
}

/// Field values of every quick-action form; kept between uses
#[derive(Clone, Debug, PartialEq)]
pub struct QuickForms {
    pub list_path: String,
    pub search_path: String,
    pub search_query: String,
    pub search_case: SearchCase,
    pub search_max: String,
    pub read_path: String,
    pub read_start: String,
    pub read_lines: String,
    pub read_tail: String,
    pub read_count: bool,
    pub clipboard_content: String,
    pub screenshot_format: ImageFormat,
}

impl Default for QuickForms {
    fn default() -> Self {
        QuickForms {
            list_path: String::from(DEFAULT_FORM_PATH),
            search_path: String::from(DEFAULT_FORM_PATH),
            search_query: String::new(),
            search_case: SearchCase::default(),
            search_max: String::from(DEFAULT_SEARCH_MAX),
            read_path: String::from(DEFAULT_FORM_PATH),
            read_start: String::new(),
            read_lines: String::new(),
            read_tail: String::new(),
            read_count: false,
            clipboard_content: String::new(),
            screenshot_format: ImageFormat::default(),
        }
    }
}

impl QuickForms {
    /// Text of a field as shown in the form
    pub fn display(&self, field: FormField) -> String {
        match field {
            FormField::SearchCase => self.search_case.as_str().to_string(),
            FormField::ReadCount => (if self.read_count { "on" } else { "off" }).to_string(),
            FormField::ScreenshotFormat => self.screenshot_format.as_str().to_string(),
            _ => self.text(field).map(str::to_string).unwrap_or_default(),
        }
    }

    /// Free-text field contents; `None` for choice fields
    pub fn text(&self, field: FormField) -> Option<&str> {
        self.text_ref(field).map(String::as_str)
    }

    fn text_ref(&self, field: FormField) -> Option<&String> {
        match field {
            FormField::ListPath => Some(&self.list_path),
            FormField::SearchPath => Some(&self.search_path),
            FormField::SearchQuery => Some(&self.search_query),
            FormField::SearchMax => Some(&self.search_max),
            FormField::ReadPath => Some(&self.read_path),
            FormField::ReadStart => Some(&self.read_start),
            FormField::ReadLines => Some(&self.read_lines),
            FormField::ReadTail => Some(&self.read_tail),
            FormField::ClipboardContent => Some(&self.clipboard_content),
            FormField::SearchCase | FormField::ReadCount | FormField::ScreenshotFormat => None,
        }
    }

    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::ListPath => Some(&mut self.list_path),
            FormField::SearchPath => Some(&mut self.search_path),
            FormField::SearchQuery => Some(&mut self.search_query),
            FormField::SearchMax => Some(&mut self.search_max),
            FormField::ReadPath => Some(&mut self.read_path),
            FormField::ReadStart => Some(&mut self.read_start),
            FormField::ReadLines => Some(&mut self.read_lines),
            FormField::ReadTail => Some(&mut self.read_tail),
            FormField::ClipboardContent => Some(&mut self.clipboard_content),
            FormField::SearchCase | FormField::ReadCount | FormField::ScreenshotFormat => None,
        }
    }

    /// Advance a choice field to its next value
    pub fn cycle_choice(&mut self, field: FormField) {
        match field {
            FormField::SearchCase => self.search_case = self.search_case.toggle(),
            FormField::ReadCount => self.read_count = !self.read_count,
            FormField::ScreenshotFormat => {
                self.screenshot_format = self.screenshot_format.toggle()
            }
            _ => {}
        }
    }

    /// Snapshot the fields of one action
    pub fn action(&self, kind: ActionKind) -> QuickAction {
        match kind {
            ActionKind::Disks => QuickAction::Disks,
            ActionKind::List => QuickAction::List {
                path: self.list_path.clone(),
            },
            ActionKind::Search => QuickAction::Search(SearchForm {
                path: self.search_path.clone(),
                query: self.search_query.clone(),
                case: self.search_case,
                max: self.search_max.clone(),
            }),
            ActionKind::Read => QuickAction::Read(ReadForm {
                path: self.read_path.clone(),
                start: self.read_start.clone(),
                lines: self.read_lines.clone(),
                tail: self.read_tail.clone(),
                count: self.read_count,
            }),
            ActionKind::ClipboardGet => QuickAction::ClipboardGet,
            ActionKind::ClipboardPut => QuickAction::ClipboardPut {
                content: self.clipboard_content.clone(),
            },
            ActionKind::Screenshot => QuickAction::Screenshot {
                format: self.screenshot_format,
            },
            ActionKind::Exit => QuickAction::Exit,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchForm {
    pub path: String,
    pub query: String,
    pub case: SearchCase,
    pub max: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReadForm {
    pub path: String,
    pub start: String,
    pub lines: String,
    pub tail: String,
    pub count: bool,
}

/// A quick action with its input values
#[derive(Clone, Debug, PartialEq)]
pub enum QuickAction {
    List { path: String },
    Search(SearchForm),
    Read(ReadForm),
    ClipboardGet,
    ClipboardPut { content: String },
    Screenshot { format: ImageFormat },
    Disks,
    Exit,
}

/// What compiling an action does to the staged body
#[derive(Clone, Debug, PartialEq)]
pub enum BodyChange {
    Keep,
    Clear,
    Set(String),
}

/// Output of compiling a quick action
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: BodyChange,
}

impl CompiledRequest {
    fn get(path: String, body: BodyChange) -> Self {
        CompiledRequest {
            method: HttpMethod::GET,
            path,
            body,
        }
    }

    /// Write method, path and any targeted body into the draft.
    pub fn apply(self, request: &mut RequestState) {
        request.method = self.method;
        request.path = self.path;
        match self.body {
            BodyChange::Keep => {}
            BodyChange::Clear => request.body.clear(),
            BodyChange::Set(body) => request.body = body,
        }
    }
}

/// Ordered, encoded query string builder
#[derive(Default)]
struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    fn push(&mut self, key: &'static str, value: &str) {
        self.pairs.push((key, urlencoding::encode(value).into_owned()));
    }

    fn push_non_empty(&mut self, key: &'static str, value: &str) {
        if !value.is_empty() {
            self.push(key, value);
        }
    }

    fn finish(self, endpoint: &str) -> String {
        let query = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, query)
        }
    }
}

/// Parse an optional whole number; empty input means "absent"
fn optional_number(field: &'static str, raw: &str) -> Result<Option<u64>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| FormError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

fn search_max(raw: &str) -> Result<Option<u32>, FormError> {
    let Some(value) = optional_number("max", raw)? else {
        return Ok(None);
    };
    let (min, max) = (*SEARCH_MAX_RANGE.start(), *SEARCH_MAX_RANGE.end());
    match u32::try_from(value) {
        Ok(v) if SEARCH_MAX_RANGE.contains(&v) => Ok(Some(v)),
        _ => Err(FormError::OutOfRange {
            field: "max",
            value: u32::try_from(value).unwrap_or(u32::MAX),
            min,
            max,
        }),
    }
}

impl QuickAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            QuickAction::List { .. } => ActionKind::List,
            QuickAction::Search(_) => ActionKind::Search,
            QuickAction::Read(_) => ActionKind::Read,
            QuickAction::ClipboardGet => ActionKind::ClipboardGet,
            QuickAction::ClipboardPut { .. } => ActionKind::ClipboardPut,
            QuickAction::Screenshot { .. } => ActionKind::Screenshot,
            QuickAction::Disks => ActionKind::Disks,
            QuickAction::Exit => ActionKind::Exit,
        }
    }

    /// Compile into a method/path pair plus the body change, if any.
    pub fn compile(&self) -> Result<CompiledRequest, FormError> {
        let compiled = match self {
            QuickAction::List { path } => {
                let mut q = Query::default();
                q.push("path", path);
                CompiledRequest::get(q.finish("/list"), BodyChange::Keep)
            }
            QuickAction::Search(form) => {
                let max = search_max(&form.max)?;
                let mut q = Query::default();
                q.push("path", &form.path);
                q.push_non_empty("query", &form.query);
                q.push("case", form.case.as_str());
                if let Some(max) = max {
                    q.push("max", &max.to_string());
                }
                CompiledRequest::get(q.finish("/search"), BodyChange::Keep)
            }
            QuickAction::Read(form) => {
                let start = optional_number("start", &form.start)?;
                let lines = optional_number("lines", &form.lines)?;
                let tail = optional_number("tail", &form.tail)?;
                let mut q = Query::default();
                q.push("path", &form.path);
                for (key, value) in [("start", start), ("lines", lines), ("tail", tail)] {
                    if let Some(value) = value {
                        q.push(key, &value.to_string());
                    }
                }
                if form.count {
                    q.push("count", "true");
                }
                CompiledRequest::get(q.finish("/read"), BodyChange::Keep)
            }
            QuickAction::ClipboardGet => {
                CompiledRequest::get("/clipboard".to_string(), BodyChange::Clear)
            }
            QuickAction::ClipboardPut { content } => CompiledRequest {
                method: HttpMethod::PUT,
                path: "/clipboard".to_string(),
                body: BodyChange::Set(serde_json::json!({ "content": content }).to_string()),
            },
            QuickAction::Screenshot { format } => {
                let mut q = Query::default();
                q.push("format", format.as_str());
                CompiledRequest::get(q.finish("/screenshot"), BodyChange::Clear)
            }
            QuickAction::Disks => CompiledRequest::get("/disks".to_string(), BodyChange::Clear),
            QuickAction::Exit => CompiledRequest::get("/exit".to_string(), BodyChange::Clear),
        };
        Ok(compiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_pairs(path: &str) -> Vec<(String, String)> {
        let (_, query) = path.split_once('?').unwrap_or((path, ""));
        query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| {
                let (k, v) = p.split_once('=').unwrap();
                (k.to_string(), urlencoding::decode(v).unwrap().into_owned())
            })
            .collect()
    }

    fn read_form(path: &str) -> ReadForm {
        ReadForm {
            path: path.to_string(),
            start: String::new(),
            lines: String::new(),
            tail: String::new(),
            count: false,
        }
    }

    #[test]
    fn test_list_encodes_path() {
        let compiled = QuickAction::List { path: "C:\\Program Files".to_string() }
            .compile()
            .unwrap();
        assert_eq!(compiled.method, HttpMethod::GET);
        assert_eq!(compiled.path, "/list?path=C%3A%5CProgram%20Files");
        assert_eq!(compiled.body, BodyChange::Keep);
    }

    #[test]
    fn test_search_parameter_order() {
        let form = SearchForm {
            path: "C:\\".to_string(),
            query: "text".to_string(),
            case: SearchCase::Insensitive,
            max: "50".to_string(),
        };
        let compiled = QuickAction::Search(form).compile().unwrap();
        assert!(compiled.path.starts_with("/search?path=C%3A%5C&"));
        assert_eq!(
            query_pairs(&compiled.path),
            vec![
                ("path".to_string(), "C:\\".to_string()),
                ("query".to_string(), "text".to_string()),
                ("case".to_string(), "i".to_string()),
                ("max".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_omits_empty_query_and_max() {
        let form = SearchForm {
            path: "/tmp".to_string(),
            query: String::new(),
            case: SearchCase::Sensitive,
            max: String::new(),
        };
        let compiled = QuickAction::Search(form).compile().unwrap();
        assert_eq!(compiled.path, "/search?path=%2Ftmp&case=sensitive");
    }

    #[test]
    fn test_search_encodes_query_value() {
        let form = SearchForm {
            path: "x".to_string(),
            query: "a&b=c d".to_string(),
            case: SearchCase::Insensitive,
            max: "1000".to_string(),
        };
        let compiled = QuickAction::Search(form).compile().unwrap();
        assert_eq!(compiled.path, "/search?path=x&query=a%26b%3Dc%20d&case=i&max=1000");
    }

    #[test]
    fn test_search_max_range() {
        for bad in ["0", "1001", "99999999999"] {
            let form = SearchForm {
                path: "x".to_string(),
                query: String::new(),
                case: SearchCase::Insensitive,
                max: bad.to_string(),
            };
            let err = QuickAction::Search(form).compile().unwrap_err();
            assert!(matches!(err, FormError::OutOfRange { field: "max", .. }), "{bad}");
        }
    }

    #[test]
    fn test_read_only_path() {
        let compiled = QuickAction::Read(read_form("C:\\log.txt")).compile().unwrap();
        assert_eq!(query_pairs(&compiled.path).len(), 1);
        assert_eq!(compiled.path, "/read?path=C%3A%5Clog.txt");
    }

    #[test]
    fn test_read_all_fields_in_order() {
        let form = ReadForm {
            start: "1".to_string(),
            lines: " 200 ".to_string(),
            tail: "20".to_string(),
            count: true,
            ..read_form("a.txt")
        };
        let compiled = QuickAction::Read(form).compile().unwrap();
        assert_eq!(
            compiled.path,
            "/read?path=a.txt&start=1&lines=200&tail=20&count=true"
        );
    }

    #[test]
    fn test_read_skips_empty_middle_field() {
        let form = ReadForm {
            tail: "5".to_string(),
            ..read_form("a.txt")
        };
        let compiled = QuickAction::Read(form).compile().unwrap();
        assert_eq!(compiled.path, "/read?path=a.txt&tail=5");
    }

    #[test]
    fn test_read_rejects_non_numeric() {
        let form = ReadForm {
            lines: "ten".to_string(),
            ..read_form("a.txt")
        };
        let err = QuickAction::Read(form).compile().unwrap_err();
        assert_eq!(
            err,
            FormError::NotANumber {
                field: "lines",
                value: "ten".to_string()
            }
        );
    }

    #[test]
    fn test_clipboard_put_sets_json_body() {
        let compiled = QuickAction::ClipboardPut { content: "hi \"there\"".to_string() }
            .compile()
            .unwrap();
        assert_eq!(compiled.method, HttpMethod::PUT);
        assert_eq!(compiled.path, "/clipboard");
        let BodyChange::Set(body) = compiled.body else {
            panic!("expected body to be set");
        };
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, serde_json::json!({ "content": "hi \"there\"" }));
    }

    #[test]
    fn test_clipboard_put_empty_content() {
        let compiled = QuickAction::ClipboardPut { content: String::new() }
            .compile()
            .unwrap();
        assert_eq!(compiled.body, BodyChange::Set(r#"{"content":""}"#.to_string()));
    }

    #[test]
    fn test_body_clearing_actions() {
        let cases = [
            (QuickAction::ClipboardGet, "/clipboard"),
            (QuickAction::Screenshot { format: ImageFormat::Jpg }, "/screenshot?format=jpg"),
            (QuickAction::Disks, "/disks"),
            (QuickAction::Exit, "/exit"),
        ];
        for (action, path) in cases {
            let mut req = RequestState {
                method: HttpMethod::POST,
                body: "stale".to_string(),
                auth_token: "tok".to_string(),
                ..RequestState::default()
            };
            action.compile().unwrap().apply(&mut req);
            assert_eq!(req.method, HttpMethod::GET);
            assert_eq!(req.path, path);
            assert!(req.body.is_empty());
            assert_eq!(req.auth_token, "tok");
        }
    }

    #[test]
    fn test_query_actions_keep_body() {
        let mut req = RequestState {
            body: "draft".to_string(),
            ..RequestState::default()
        };
        QuickForms::default()
            .action(ActionKind::List)
            .compile()
            .unwrap()
            .apply(&mut req);
        assert_eq!(req.body, "draft");
        assert_eq!(req.path, "/list?path=C%3A%5C");
    }

    #[test]
    fn test_forms_snapshot_matches_kind() {
        let forms = QuickForms::default();
        for kind in ActionKind::ALL {
            assert_eq!(forms.action(kind).kind(), kind);
        }
        assert_eq!(ActionKind::Exit.next(), ActionKind::Disks);
        assert_eq!(ActionKind::Disks.prev(), ActionKind::Exit);
    }

    #[test]
    fn test_choice_fields_cycle() {
        let mut forms = QuickForms::default();
        forms.cycle_choice(FormField::SearchCase);
        forms.cycle_choice(FormField::ReadCount);
        forms.cycle_choice(FormField::ScreenshotFormat);
        assert_eq!(forms.display(FormField::SearchCase), "sensitive");
        assert_eq!(forms.display(FormField::ReadCount), "on");
        assert_eq!(forms.display(FormField::ScreenshotFormat), "jpg");
        assert!(forms.text_mut(FormField::SearchCase).is_none());
    }
}
