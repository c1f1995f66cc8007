pub mod markup_parser;
pub mod markup_writer;
pub mod prompt_resolver;
