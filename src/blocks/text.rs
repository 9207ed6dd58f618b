//! Text-bearing blocks: headings, paragraphs, lists, quotes and code.

use super::BlockInput;
use super::schema::{
    CodeContent, ContentRecord, HeadingContent, HtmlContent, ListContent, PreformattedContent,
    QuoteContent,
};
use crate::ast::{Element, elements};
use crate::config::ParseContext;
use crate::error::{BlockError, BlockResult};
use crate::locate::{child_texts, find_by_tag, first_child_element, first_text_content};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

pub async fn heading(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let heading = elements(input.nodes())
        .find(|element| HEADING_TAGS.contains(&element.tag.as_str()))
        .ok_or_else(|| BlockError::NotFound("<h1>-<h6> element".to_string()))?;

    Ok(ContentRecord::Heading(HeadingContent {
        text: first_text_content(heading)?.to_string(),
        size: heading.tag.clone(),
    }))
}

/// Inline formatting is kept by passing the markup through untouched
pub async fn paragraph(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    Ok(ContentRecord::Paragraph(HtmlContent {
        html: input.html().to_string(),
    }))
}

pub async fn list(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let list = find_by_tag(input.nodes(), "ul").or_else(|_| find_by_tag(input.nodes(), "ol"))?;

    Ok(ContentRecord::List(ListContent {
        items: child_texts(list)?,
    }))
}

pub async fn quote(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let blockquote = find_by_tag(input.nodes(), "blockquote")?;
    Ok(ContentRecord::Quote(text_and_citation(blockquote)?))
}

pub async fn pullquote(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let figure = find_by_tag(input.nodes(), "figure")?;
    let quote = first_child_element(figure)?;
    Ok(ContentRecord::Pullquote(text_and_citation(quote)?))
}

/// Texts of the first two child elements; the citation is optional and any
/// later children are ignored
fn text_and_citation(quote: &Element) -> BlockResult<QuoteContent> {
    let mut children = quote.child_elements();
    let text = children
        .next()
        .ok_or_else(|| BlockError::NotFound("quote text".to_string()))?;
    let text = first_text_content(text)?.to_string();
    let citation = children.next().map(first_text_content).transpose()?;

    Ok(QuoteContent {
        text,
        citation: citation.map(str::to_string),
    })
}

pub async fn preformatted(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let pre = find_by_tag(input.nodes(), "pre")?;
    Ok(ContentRecord::Preformatted(PreformattedContent {
        text: first_text_content(pre)?.to_string(),
    }))
}

pub async fn code(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let pre = find_by_tag(input.nodes(), "pre")?;
    let code = first_child_element(pre)?;
    Ok(ContentRecord::Code(CodeContent {
        code: first_text_content(code)?.to_string(),
    }))
}

pub async fn html(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    Ok(ContentRecord::Html(HtmlContent {
        html: input.html().to_string(),
    }))
}

/// Serialized back to markup so `<br>` line breaks survive
pub async fn verse(input: &BlockInput, ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let pre = find_by_tag(input.nodes(), "pre")?;
    Ok(ContentRecord::Verse(HtmlContent {
        html: ctx.markup().stringify(&pre.children),
    }))
}
