use std::io;
use std::ops::Range;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::{Config, Diagnostic, DiagnosticKind, SnippetKind};
use crate::span::Span;

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor, S: Sources> DiagnosticWriter<'_, 'a, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        for source_data in self.snippets_by_source() {
            let groups = get_overlapping_groups(source_data.snippets, |s| s.context.clone());
            for (snippets, lines) in groups {
                self.draw_group(source_data.source, &snippets, lines)?;
            }
        }

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.get_primary_color())?;

        if let Some(id) = &self.diagnostic.id {
            write!(self.stream, "[{id}] ")?;
        }

        write!(self.stream, "{}:", self.diagnostic.kind.as_str())?;

        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_group(
        &mut self,
        source: &Cached<S::Source>,
        snippets: &[SnippetData],
        lines: Range<usize>,
    ) -> io::Result<()> {
        let line_num_width = 1 + lines.end.max(1).ilog10() as usize;

        // all groups have at least one snippet
        let first = &snippets[0];
        let col_num = first.span.column.max(1);

        self.stream.set_color(&self.config.subtle)?;
        write!(
            self.stream,
            "In {}:{}:{col_num}",
            source.name_str(),
            first.line + 1
        )?;

        if let Some(path) = source.path() {
            write!(
                self.stream,
                " ({}:{}:{col_num})",
                path.display(),
                first.line + 1
            )?;
        }

        writeln!(self.stream)?;
        self.stream.reset()?;

        for line in lines {
            let raw_line = source.line_str(line).unwrap_or_default();

            self.draw_gutter(Some(line + 1), line_num_width)?;
            writeln!(self.stream, "{}", raw_line.replace('\t', TAB))?;

            for snippet in snippets {
                if snippet.line != line {
                    continue;
                }

                self.draw_gutter(None, line_num_width)?;

                let (offset, width) = underline_extent(raw_line, snippet.span);

                self.stream
                    .set_color(self.get_snippet_color(snippet.kind))?;

                write!(self.stream, "{:<offset$}", "")?;

                for _ in 0..width {
                    write!(self.stream, "{}", self.config.underline)?;
                }

                writeln!(
                    self.stream,
                    "{}{}",
                    self.config.underline_after, snippet.label
                )?;

                self.stream.reset()?;
            }
        }

        writeln!(self.stream)?;

        Ok(())
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        if let Some(line) = line {
            write!(self.stream, "{line:>width$}", width = line_num_width)?;
        } else {
            write!(self.stream, "{:>width$}", "", width = line_num_width)?;
        }

        write!(self.stream, " {} ", self.config.gutter)?;

        self.stream.reset()?;

        Ok(())
    }

    fn snippets_by_source(&self) -> Vec<SourceData<'a, S>> {
        let mut source_datas: Vec<SourceData<'a, S>> = vec![];

        for snippet in &self.diagnostic.snippets {
            let Some(source) = self.sources.get_source(snippet.source_id) else {
                continue;
            };

            let index = match source_datas
                .iter()
                .position(|data| data.source_id == snippet.source_id)
            {
                Some(index) => index,
                None => {
                    source_datas.push(SourceData {
                        source_id: snippet.source_id,
                        source,
                        snippets: vec![],
                    });
                    source_datas.len() - 1
                }
            };

            // spans past the end (e.g. at end of input) point at the last line
            let last_line = source.num_lines().saturating_sub(1);
            let line = (snippet.span.line as usize)
                .saturating_sub(1)
                .min(last_line);

            let context_start = line.saturating_sub(self.config.context_size);
            let context_end = (line + 1 + self.config.context_size).min(source.num_lines());

            source_datas[index].snippets.push(SnippetData {
                label: &snippet.label,
                kind: snippet.kind,

                span: snippet.span,
                line,
                context: context_start..context_end,
            });
        }

        source_datas
    }

    fn get_primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.kind {
            DiagnosticKind::Warning => &self.config.warning_color,
            DiagnosticKind::Error => &self.config.error_color,
        }
    }

    fn get_secondary_color(&self) -> &'a ColorSpec {
        &self.config.emphasis
    }

    fn get_snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.get_primary_color(),
            SnippetKind::Secondary => self.get_secondary_color(),
        }
    }
}

struct SourceData<'a, S: Sources> {
    source_id: S::SourceId,
    source: &'a Cached<S::Source>,
    snippets: Vec<SnippetData<'a>>,
}

#[derive(Clone)]
struct SnippetData<'a> {
    label: &'a str,
    kind: SnippetKind,

    span: Span,
    // 0-based
    line: usize,
    context: Range<usize>,
}

/// Returns the display offset and width of the underline for `span` on `line`.
fn underline_extent(line: &str, span: Span) -> (usize, usize) {
    if span.is_whole_line() {
        let trimmed = line.trim_start();
        let offset = str_width(&line[..line.len() - trimmed.len()]);
        return (offset, str_width(trimmed.trim_end()).max(1));
    }

    let start = char_to_byte(line, span.column as usize - 1);
    let end = char_to_byte(line, (span.column + span.len) as usize - 1);

    let offset = str_width(&line[..start]);
    let width = str_width(&line[start..end]).max(1);

    (offset, width)
}

fn char_to_byte(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

fn get_overlapping_groups<T, F>(mut ranges: Vec<T>, get_range: F) -> Vec<(Vec<T>, Range<usize>)>
where
    F: Fn(&T) -> Range<usize>,
{
    ranges.sort_by_key(|item| get_range(item).start);

    let mut groups = vec![];

    let mut group = vec![];
    let mut group_start = 0;
    let mut group_end = 0;

    for item in ranges {
        let range = get_range(&item);

        if range.start > group_end || group.is_empty() {
            if !group.is_empty() {
                groups.push((std::mem::take(&mut group), group_start..group_end));
            }

            group_start = range.start;
        }

        group_end = group_end.max(range.end);
        group.push(item);
    }

    if !group.is_empty() {
        groups.push((group, group_start..group_end));
    }

    groups
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}
