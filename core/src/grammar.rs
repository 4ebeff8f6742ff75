use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "filterspec.pest"]
pub struct SpecParser;
