use std::num::IntErrorKind;

use roxmltree::{Document, Node, ParsingOptions};
use serde_json::{json, Value};

use crate::config::constants::{MARKUP_CONTEXT_LIMIT, MAX_MARKUP_NODES, MAX_NESTING_DEPTH};
use crate::enums::parser_error_code::ParserErrorCode;
use crate::errors::{ParserError, ParserResult};
use crate::helpers::text::markup_for_context;
use crate::structs::change::{Add, Change, Delete, Modify};
use crate::structs::change_request::ChangeRequest;
use crate::structs::field_violation::FieldViolation;
use crate::structs::file_ref::FileRef;

const ROOT_TAG: &str = "code-change";
const SUMMARY_TAG: &str = "summary";
const FILES_TO_CHANGE_TAG: &str = "files-to-change";
const FILE_TAG: &str = "file";
const CHANGES_TAG: &str = "changes";
const CHANGE_TAG: &str = "change";
const MODIFY_TAG: &str = "modify";
const ADD_TAG: &str = "add";
const DELETE_TAG: &str = "delete";
const ADDITIONAL_STEPS_TAG: &str = "additional-steps";
const VERIFICATION_TAG: &str = "verification";
const STEP_TAG: &str = "step";
const NAME_ATTR: &str = "name";
const FILE_NAME_ATTR: &str = "file-name";
const START_LINE_ATTR: &str = "start-line";
const END_LINE_ATTR: &str = "end-line";
const CONTENT_FIELD: &str = "content";
const ROOT_SECTIONS: &[&str] = &[
    SUMMARY_TAG,
    FILES_TO_CHANGE_TAG,
    CHANGES_TAG,
    ADDITIONAL_STEPS_TAG,
    VERIFICATION_TAG,
];

const FIELD_REQUIRED: &str = "Field required";
const EMPTY_STRING: &str = "String should have at least 1 character";

/// Parses change-request markup into a [`ChangeRequest`].
pub fn parse_markup(markup: &str) -> ParserResult<ChangeRequest> {
    MarkupParser::new(markup).parse()
}

/// Decodes one markup document. Field-level problems are collected rather
/// than failing on the first one, so a single error can name all of them.
pub struct MarkupParser<'a> {
    markup: &'a str,
    nodes_limit: u32,
    violations: Vec<FieldViolation>,
}

impl<'a> MarkupParser<'a> {
    pub fn new(markup: &'a str) -> Self {
        Self {
            markup,
            nodes_limit: MAX_MARKUP_NODES,
            violations: Vec::new(),
        }
    }

    /// Caps the number of nodes the document may expand to, entity expansions included.
    #[must_use]
    pub fn nodes_limit(mut self, limit: u32) -> Self {
        self.nodes_limit = limit;
        self
    }

    pub fn parse(mut self) -> ParserResult<ChangeRequest> {
        self.validate_input()?;

        let options = ParsingOptions {
            allow_dtd: true,
            nodes_limit: self.nodes_limit,
        };
        let document =
            Document::parse_with_options(self.markup, options).map_err(|error| self.markup_error(&error))?;
        let root = document.root_element();

        self.check_nesting(root)?;
        self.check_root(root)?;

        let request = self.decode_change_request(root);
        match request {
            Some(request) if self.violations.is_empty() => {
                log::debug!(
                    "Parsed change request: {} files, {} changes, {} operations",
                    request.files_to_change.len(),
                    request.changes.len(),
                    request.total_operations()
                );
                Ok(request)
            }
            _ => Err(self.validation_error()),
        }
    }

    fn validate_input(&self) -> ParserResult<()> {
        if self.markup.trim().is_empty() {
            log::debug!("Rejecting empty markup");
            return Err(self.error(
                ParserErrorCode::InvalidMarkup,
                "Empty or whitespace-only markup provided".to_string(),
                "input_validation",
            ));
        }

        Ok(())
    }

    fn check_nesting(&self, root: Node<'_, '_>) -> ParserResult<()> {
        let mut stack = vec![(root, 1_usize)];

        while let Some((node, depth)) = stack.pop() {
            if depth > MAX_NESTING_DEPTH {
                log::debug!("Markup nesting exceeds {} levels", MAX_NESTING_DEPTH);
                return Err(self
                    .error(
                        ParserErrorCode::ParsingError,
                        "Markup document too deeply nested".to_string(),
                        "recursion_limit",
                    )
                    .with_context([("max_depth", MAX_NESTING_DEPTH)]));
            }

            stack.extend(
                node.children()
                    .filter(Node::is_element)
                    .map(|child| (child, depth + 1)),
            );
        }

        Ok(())
    }

    fn check_root(&self, root: Node<'_, '_>) -> ParserResult<()> {
        let found = root.tag_name().name();
        if found == ROOT_TAG {
            return Ok(());
        }

        log::debug!("Unexpected root element <{}>", found);
        Err(self
            .error(
                ParserErrorCode::MissingElement,
                format!(
                    "Markup structure error: expected root element <{}>, found <{}>",
                    ROOT_TAG, found
                ),
                "structural_parsing",
            )
            .with_context([("expected_root", ROOT_TAG), ("found_root", found)]))
    }

    fn decode_change_request(&mut self, root: Node<'_, '_>) -> Option<ChangeRequest> {
        for child in root.children().filter(Node::is_element) {
            let tag = child.tag_name().name();
            if !ROOT_SECTIONS.contains(&tag) {
                log::debug!("Ignoring unknown element <{}> in <{}>", tag, ROOT_TAG);
            }
        }

        let summary = self.decode_summary(root);

        let files_to_change = first_child(root, FILES_TO_CHANGE_TAG)
            .map(|section| self.decode_files(section))
            .unwrap_or_default();
        let changes = first_child(root, CHANGES_TAG)
            .map(|section| self.decode_changes(section))
            .unwrap_or_default();
        let additional_steps = first_child(root, ADDITIONAL_STEPS_TAG)
            .map(|section| self.decode_steps(section, ADDITIONAL_STEPS_TAG))
            .unwrap_or_default();
        let verification_steps = first_child(root, VERIFICATION_TAG)
            .map(|section| self.decode_steps(section, VERIFICATION_TAG))
            .unwrap_or_default();

        Some(ChangeRequest {
            summary: summary?,
            files_to_change,
            changes,
            additional_steps,
            verification_steps,
        })
    }

    fn decode_summary(&mut self, root: Node<'_, '_>) -> Option<String> {
        let Some(node) = first_child(root, SUMMARY_TAG) else {
            self.violation(&[], SUMMARY_TAG, FIELD_REQUIRED);
            return None;
        };

        match element_text(node) {
            Some(summary) if !summary.is_empty() => Some(summary),
            _ => {
                self.violation(&[], SUMMARY_TAG, EMPTY_STRING);
                None
            }
        }
    }

    fn decode_files(&mut self, section: Node<'_, '_>) -> Vec<FileRef> {
        let mut files = Vec::new();

        for (index, node) in children_named(section, FILE_TAG).enumerate() {
            let path = [FILES_TO_CHANGE_TAG.to_string(), indexed(FILE_TAG, index)];
            match node.attribute(NAME_ATTR) {
                Some(name) => files.push(FileRef::new(name)),
                None => self.violation(&path, NAME_ATTR, FIELD_REQUIRED),
            }
        }

        files
    }

    fn decode_changes(&mut self, section: Node<'_, '_>) -> Vec<Change> {
        children_named(section, CHANGE_TAG)
            .enumerate()
            .filter_map(|(index, node)| self.decode_change(node, index))
            .collect()
    }

    fn decode_change(&mut self, node: Node<'_, '_>, index: usize) -> Option<Change> {
        let path = vec![CHANGES_TAG.to_string(), indexed(CHANGE_TAG, index)];

        let file_name = node.attribute(FILE_NAME_ATTR);
        if file_name.is_none() {
            self.violation(&path, FILE_NAME_ATTR, FIELD_REQUIRED);
        }

        let mut change = Change::new(file_name.unwrap_or_default());

        for child in node.children().filter(Node::is_element) {
            match child.tag_name().name() {
                MODIFY_TAG => {
                    let item_path = with_segment(&path, indexed(MODIFY_TAG, change.modifications.len()));
                    let modify = self.decode_modify(child, &item_path);
                    change.modifications.push(modify.unwrap_or_else(placeholder_modify));
                }
                ADD_TAG => {
                    let item_path = with_segment(&path, indexed(ADD_TAG, change.additions.len()));
                    let content = self.required_text(child, &item_path, CONTENT_FIELD);
                    change.additions.push(Add {
                        content: content.unwrap_or_default(),
                    });
                }
                DELETE_TAG => change.deletions.push(Delete {}),
                other => log::debug!("Ignoring unknown element <{}> in <{}>", other, CHANGE_TAG),
            }
        }

        file_name.map(|_| change)
    }

    fn decode_modify(&mut self, node: Node<'_, '_>, path: &[String]) -> Option<Modify> {
        let start_line = self.line_attribute(node, path, START_LINE_ATTR);
        let end_line = self.line_attribute(node, path, END_LINE_ATTR);
        let content = self.required_text(node, path, CONTENT_FIELD);

        Some(Modify {
            start_line: start_line.ok()?,
            end_line: end_line.ok()?,
            content: content?,
        })
    }

    /// `Ok(None)` when the attribute is absent, `Err(())` once a violation was recorded.
    fn line_attribute(&mut self, node: Node<'_, '_>, path: &[String], attr: &str) -> Result<Option<u64>, ()> {
        let Some(raw) = node.attribute(attr) else {
            return Ok(None);
        };

        raw.trim().parse::<u64>().map(Some).map_err(|error| {
            let message = match error.kind() {
                IntErrorKind::PosOverflow => format!(
                    "Input should be a non-negative integer no greater than {}, got '{}'",
                    u64::MAX,
                    raw
                ),
                _ => format!("Input should be a valid non-negative integer, got '{}'", raw),
            };
            self.violation(path, attr, &message);
        })
    }

    fn decode_steps(&mut self, section: Node<'_, '_>, section_tag: &str) -> Vec<String> {
        let path = [section_tag.to_string()];

        children_named(section, STEP_TAG)
            .enumerate()
            .filter_map(|(index, node)| match element_text(node) {
                Some(step) => Some(step),
                None => {
                    self.violation(&path, &indexed(STEP_TAG, index), FIELD_REQUIRED);
                    None
                }
            })
            .collect()
    }

    fn required_text(&mut self, node: Node<'_, '_>, path: &[String], field: &str) -> Option<String> {
        let text = element_text(node);
        if text.is_none() {
            self.violation(path, field, FIELD_REQUIRED);
        }
        text
    }

    fn violation(&mut self, path: &[String], field: &str, message: &str) {
        let violation = FieldViolation::new(path, field, message);
        log::debug!("Validation failure: {}", violation);
        self.violations.push(violation);
    }

    fn validation_error(&self) -> ParserError {
        let fields: Vec<Value> = self
            .violations
            .iter()
            .map(|violation| Value::String(violation.path.clone()))
            .collect();

        self.error(
            ParserErrorCode::ParsingError,
            format!("Validation failed: {}", FieldViolation::join(&self.violations)),
            "validation",
        )
        .with_context([
            ("error_count", json!(self.violations.len())),
            ("fields", Value::Array(fields)),
        ])
    }

    fn markup_error(&self, error: &roxmltree::Error) -> ParserError {
        use roxmltree::Error as MarkupError;

        let (code, operation, description) = match error {
            MarkupError::NodesLimitReached
            | MarkupError::AttributesLimitReached
            | MarkupError::NamespacesLimitReached => (
                ParserErrorCode::ParsingError,
                "memory_allocation",
                "Markup document too large to process",
            ),
            MarkupError::EntityReferenceLoop(_) => (
                ParserErrorCode::ParsingError,
                "recursion_limit",
                "Markup entity references nest too deeply",
            ),
            MarkupError::NonXmlChar(..) => (
                ParserErrorCode::ParsingError,
                "encoding",
                "Text encoding error",
            ),
            _ => (ParserErrorCode::InvalidMarkup, "markup_parsing", "Malformed markup"),
        };

        log::debug!("Markup rejected during {}: {}", operation, error);
        let classified = self.error(code, format!("{}: {}", description, error), operation);

        if operation == "markup_parsing" {
            let position = error.pos();
            return classified.with_context([("line_number", position.row), ("column", position.col)]);
        }

        classified
    }

    /// Builds an error carrying the (possibly truncated) markup and the failing stage.
    fn error(&self, code: ParserErrorCode, source: String, operation: &str) -> ParserError {
        let mut error = ParserError::with_source(code, source).with_context([
            ("markup", json!(markup_for_context(self.markup))),
            ("operation", json!(operation)),
        ]);

        if self.markup.chars().count() > MARKUP_CONTEXT_LIMIT {
            error = error.with_context([("markup_size", self.markup.len())]);
        }

        error
    }
}

fn first_child<'d, 'i>(node: Node<'d, 'i>, tag: &str) -> Option<Node<'d, 'i>> {
    children_named(node, tag).next()
}

fn children_named<'d, 'i, 't>(node: Node<'d, 'i>, tag: &'t str) -> impl Iterator<Item = Node<'d, 'i>> + 't
where
    'd: 't,
    'i: 't,
{
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == tag)
}

/// Concatenated direct text children (CDATA included), trimmed.
/// `None` when the element has no text at all.
fn element_text(node: Node<'_, '_>) -> Option<String> {
    let mut text: Option<String> = None;

    for chunk in node.children().filter(Node::is_text).filter_map(|child| child.text()) {
        text.get_or_insert_with(String::new).push_str(chunk);
    }

    text.map(|text| text.trim().to_string())
}

fn indexed(tag: &str, index: usize) -> String {
    format!("{}[{}]", tag, index)
}

fn with_segment(path: &[String], segment: String) -> Vec<String> {
    let mut extended = path.to_vec();
    extended.push(segment);
    extended
}

// Keeps per-kind indexes aligned with the document when an entry is invalid;
// any violation discards the whole request anyway.
fn placeholder_modify() -> Modify {
    Modify {
        start_line: None,
        end_line: None,
        content: String::new(),
    }
}
