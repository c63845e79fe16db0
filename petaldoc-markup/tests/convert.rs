use petaldoc_markup::{convert, utils::strip_html_comments_outside_code};

#[test]
fn pipe_inside_code_fence_is_not_a_table() {
  let md = "# Grid\n\n```text\n| not | a | table |\n|---|---|---|\n```\n\n| \
            Real | Table |\n|---|---|\n| a | b |";
  let html = convert(md, 1);

  assert_eq!(html.matches("<table>").count(), 1);
  assert!(html.contains("| not | a | table |"));
  assert!(html.contains("<td>a</td>"));
}

#[test]
fn local_markdown_links_are_rewritten() {
  for name in ["DaisyButton", "guides/Theming", "../categories/actions"] {
    let html = convert(&format!("[x]({name}.md)"), 0);
    assert!(
      html.contains(&format!("href=\"{name}.html\"")),
      "link to {name} was not rewritten: {html}"
    );
  }
}

#[test]
fn external_links_open_in_new_context() {
  let html = convert("[Repo](https://github.com/example/repo)", 0);
  assert!(html.contains("target=\"_blank\""));
  assert!(html.contains("rel=\"noopener\""));
}

#[test]
fn code_fence_content_survives_every_pass() {
  let md = "```csharp\nvar x = a * b * c; // **not bold**\n- not a list\n```";
  let html = convert(md, 0);

  assert!(html.contains("var x = a * b * c; // **not bold**"));
  assert!(html.contains("- not a list"));
  assert!(!html.contains("<li>"));
  assert!(!html.contains("<strong>"));
}

#[test]
fn multiple_code_blocks_are_restored_in_order() {
  let md = "```xml\nfirst\n```\n\ntext\n\n```xml\nsecond\n```";
  let html = convert(md, 0);

  let first = html.find("first").unwrap_or(usize::MAX);
  let second = html.find("second").unwrap_or(0);
  assert!(first < second);
  assert!(!html.contains("PETALDOC_CODE_BLOCK"));
}

#[test]
fn conversion_is_deterministic() {
  let md = "# A\n\n| x | y |\n|---|---|\n| 1 | 2 |\n\n- item\n\n```\ncode\n```";
  assert_eq!(convert(md, 1), convert(md, 1));
}

#[test]
fn comments_are_stripped_before_conversion() {
  let md = "<!-- description: hidden -->\n# Title\n\n```xml\n<!-- shown \
            -->\n```";
  let html = convert(&strip_html_comments_outside_code(md), 0);

  assert!(!html.contains("description: hidden"));
  assert!(html.contains("&lt;!-- shown --&gt;"));
}
