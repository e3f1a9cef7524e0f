use thiserror::Error;

/// A structural assumption about the survey page no longer holds.
///
/// Any of these makes the page count or the record shape untrustworthy, so
/// callers abort the whole run instead of writing partial output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("no <tr> found in the page")]
    NoAnchorRow,
    #[error("no <tbody> found after the first <tr>")]
    NoTableBody,
    #[error("text 'Previous' not found")]
    NoPreviousLabel,
    #[error("'Previous' label has no parent element")]
    NoLabelParent,
    #[error("'Previous' label has no enclosing <div>")]
    NoPaginationContainer,
    #[error("no <div> follows the pagination container")]
    NoPageLinkGroup,
    #[error("no links in the page link group")]
    NoPageLinks,
    #[error("last page link is not a page number: {0:?}")]
    BadLastPage(String),
}

pub type StructureResult<T> = Result<T, StructureError>;
