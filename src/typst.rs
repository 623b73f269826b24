use crate::config::{Config, TextLine};
use crate::oficio::Oficio;
use crate::render::{StyledSpan, TextBlock};

/// Space between the main sections of the letter
const SECTION_SPACING: &str = "15pt";
/// Dark grey used for separator rules
const RULE_STROKE: &str = "1pt + rgb(\"#616161\")";

/// Build the Typst source of a complete letter.
///
/// `body` is the rendered content of the record; it is only placed when the
/// record has content at all.
pub fn oficio_to_typst(oficio: &Oficio, body: &[TextBlock], config: &Config) -> String {
    let mut out = String::new();

    emit_setup(config, &mut out);
    emit_info(oficio, &mut out);

    let annexes = oficio.annexes();
    if oficio.has_content() {
        section_gap(&mut out);
        out.push_str(&format!(
            "#text(size: 12pt, weight: \"semibold\", {})\n\n",
            string_literal(&config.body.intro)
        ));
        section_gap(&mut out);
        emit_body(body, &mut out);
        if annexes.is_some() {
            section_gap(&mut out);
            out.push_str(&format!("#line(length: 100%, stroke: {RULE_STROKE})\n\n"));
        }
    }

    if let Some(annexes) = annexes {
        section_gap(&mut out);
        out.push_str("#text(size: 11pt, weight: \"bold\", \"ANEXOS:\")\n\n");
        out.push_str(&format!("#text({})\n\n", string_literal(annexes)));
    }

    emit_signature(oficio, &mut out);
    out
}

fn emit_setup(config: &Config, out: &mut String) {
    let page = &config.page;
    let mut text_args = format!("size: {}pt, lang: \"es\"", config.font.size);
    if !config.font.family.is_empty() {
        let families = config
            .font
            .family
            .iter()
            .map(|family| string_literal(family))
            .collect::<Vec<_>>()
            .join(", ");
        text_args = format!("font: ({families},), {text_args}");
    }

    out.push_str(&format!("#set text({text_args})\n"));
    out.push_str("#set par(spacing: 0pt)\n");
    out.push_str(&format!(
        "#set page(\n  paper: {},\n  margin: (left: {}, right: {}, top: {}, bottom: {}),\n  fill: white,\n",
        string_literal(&page.paper),
        page.margin_left,
        page.margin_right,
        page.margin_top,
        page.margin_bottom,
    ));

    let mut header = Vec::new();
    if let Some(seal) = &config.letterhead.seal {
        header.push(format!(
            "image({}, height: {}, fit: \"contain\")",
            string_literal(seal),
            config.letterhead.seal_height
        ));
    }
    header.extend(config.letterhead.lines.iter().map(line_call));
    out.push_str(&format!("  header: {},\n", centered_stack(&header, "5pt")));

    let footer: Vec<String> = config.footer.lines.iter().map(line_call).collect();
    out.push_str(&format!("  footer: {},\n", centered_stack(&footer, "4pt")));
    out.push_str(")\n\n");
}

fn emit_info(oficio: &Oficio, out: &mut String) {
    let mut rows = vec![
        labelled("OFICIO No: ", &oficio.codigo),
        labelled("Fecha: ", &oficio.fecha()),
        labelled("De: ", field(&oficio.departamento_remitente)),
        labelled("Para: ", field(&oficio.dirigido_departamento)),
    ];
    if let Some(via) = oficio.via() {
        rows.push(labelled("Vía: ", via));
    }
    rows.push(labelled("Asunto: ", field(&oficio.tipo_oficio)));
    rows.push(format!("line(length: 100%, stroke: {RULE_STROKE})"));

    out.push_str(&format!(
        "#block(inset: 5pt, stack(spacing: 4pt, {}))\n\n",
        rows.join(", ")
    ));
}

fn emit_body(body: &[TextBlock], out: &mut String) {
    out.push_str("#block(inset: 10pt, fill: white)[\n");
    for block in body {
        out.push_str(&format!(
            "#block(inset: (bottom: {}pt), spacing: 0pt)[",
            block.padding_bottom
        ));
        for span in &block.spans {
            out.push('#');
            out.push_str(&span_call(span));
        }
        out.push_str("]\n");
    }
    out.push_str("]\n\n");
}

fn emit_signature(oficio: &Oficio, out: &mut String) {
    // Fractional spacing pushes the signature to the bottom of the last page
    out.push_str("#v(1fr)\n");
    let rows = [
        "block(width: 200pt, height: 14pt, stroke: (bottom: 0.8pt + black))".to_string(),
        format!(
            "text(size: 11pt, weight: \"semibold\", {})",
            string_literal(field(&oficio.encargado_departamental))
        ),
        format!(
            "text(size: 10pt, {})",
            string_literal(field(&oficio.departamento_remitente))
        ),
    ];
    out.push_str(&format!("#{}\n", centered_stack(&rows, "4pt")));
}

fn section_gap(out: &mut String) {
    out.push_str(&format!("#v({SECTION_SPACING})\n"));
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn labelled(label: &str, value: &str) -> String {
    format!(
        "[#text(weight: \"bold\", {})#text({})]",
        string_literal(label),
        string_literal(value)
    )
}

fn centered_stack(items: &[String], spacing: &str) -> String {
    let items = items
        .iter()
        .map(|item| format!("align(center, {item})"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("stack(spacing: {spacing}, {items})")
}

fn line_call(line: &TextLine) -> String {
    let mut args = format!("size: {}pt", line.size);
    if line.bold {
        args.push_str(", weight: \"bold\"");
    }
    if let Some(family) = &line.family {
        args.push_str(&format!(", font: {}", string_literal(family)));
    }
    format!("text({args}, {})", string_literal(&line.text))
}

/// A styled span as a code-mode call; empty spans are kept as empty text.
fn span_call(span: &StyledSpan) -> String {
    let mut args = format!("size: {}pt", span.size);
    if span.bold {
        args.push_str(", weight: \"bold\"");
    }
    if span.italic {
        args.push_str(", style: \"italic\"");
    }
    let call = format!("text({args}, {})", string_literal(&span.text));
    if span.underline {
        format!("underline({call})")
    } else {
        call
    }
}

/// Quote user text as a Typst string so it is never read as markup.
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
