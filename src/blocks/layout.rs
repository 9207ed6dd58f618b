//! Structural blocks: tables, buttons, columns, spacers and markers.

use std::collections::BTreeMap;

use super::schema::{
    ButtonContent, Column, ColumnsContent, ContentRecord, EmptyContent, SpacerContent,
    TableCell, TableContent, TableRow, TextEntry,
};
use super::{BlockInput, find_maybe_in_figure};
use crate::ast::elements;
use crate::config::ParseContext;
use crate::error::{BlockError, BlockResult};
use crate::locate::{find_attr, find_by_tag, first_child_element, first_text_content, require_child};
use crate::utils::strip_scheme;

/// Body rows only; rows and cells are numbered from 1
pub async fn table(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let table = find_maybe_in_figure(input.nodes(), "table")?;
    let body = require_child(table, "tbody")?;

    let rows = body
        .child_elements()
        .enumerate()
        .map(|(row_index, row)| {
            let columns = row
                .child_elements()
                .enumerate()
                .map(|(cell_index, cell)| {
                    Ok(TableCell {
                        index: cell_index + 1,
                        text: first_text_content(cell)?.to_string(),
                    })
                })
                .collect::<BlockResult<Vec<_>>>()?;

            Ok(TableRow {
                index: row_index + 1,
                columns,
            })
        })
        .collect::<BlockResult<Vec<_>>>()?;

    Ok(ContentRecord::Table(TableContent { rows }))
}

pub async fn button(input: &BlockInput, ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let container = find_by_tag(input.nodes(), "div")?;
    let anchor = first_child_element(container)?;
    let link = find_attr(&anchor.attributes, "href")?;

    Ok(ContentRecord::Button(ButtonContent {
        text: first_text_content(anchor)?.to_string(),
        link: link.to_string(),
        slug: slug(link, ctx.base_url()),
    }))
}

/// Link without its scheme and without the first occurrence of the site origin
fn slug(link: &str, base_url: &str) -> String {
    let link = strip_scheme(link);
    if base_url.is_empty() {
        link.to_string()
    } else {
        link.replacen(base_url, "", 1)
    }
}

/// Each inner block is one column; its first inner block is the header
pub async fn columns(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let columns = input
        .inner_blocks()
        .iter()
        .map(column)
        .collect::<BlockResult<Vec<_>>>()?;

    Ok(ContentRecord::Columns(ColumnsContent { columns }))
}

fn column(block: &BlockInput) -> BlockResult<Column> {
    let mut leading = block.inner_blocks().iter().map(|inner| {
        elements(inner.nodes()).next().ok_or_else(|| {
            BlockError::NotFound(format!("element in `{}` column block", inner.name()))
        })
    });

    let header = leading
        .next()
        .ok_or_else(|| BlockError::NotFound("column header block".to_string()))??;

    let content = leading
        .map(|element| {
            let element = element?;
            Ok(TextEntry {
                tag: element.tag.clone(),
                text: first_text_content(element)?.to_string(),
            })
        })
        .collect::<BlockResult<Vec<_>>>()?;

    Ok(Column {
        header: first_text_content(header)?.to_string(),
        content,
    })
}

pub async fn more(_input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    Ok(ContentRecord::More(EmptyContent {}))
}

pub async fn nextpage(_input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    Ok(ContentRecord::Nextpage(EmptyContent {}))
}

pub async fn separator(_input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    Ok(ContentRecord::Separator(EmptyContent {}))
}

pub async fn spacer(input: &BlockInput, _ctx: &ParseContext) -> BlockResult<ContentRecord> {
    let container = find_by_tag(input.nodes(), "div")?;
    let style = find_attr(&container.attributes, "style")?;

    Ok(ContentRecord::Spacer(SpacerContent {
        properties: style_declarations(style),
    }))
}

/// Fold `key:value;...` into a map; a repeated key keeps its last value
fn style_declarations(style: &str) -> BTreeMap<String, String> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (key, value) = declaration.split_once(':')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
        })
        .fold(BTreeMap::new(), |mut properties, (key, value)| {
            properties.insert(key, value);
            properties
        })
}
