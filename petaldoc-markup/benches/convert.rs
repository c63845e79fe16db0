#![allow(clippy::unwrap_used, reason = "Fine in benchmarks")]
use std::{fmt::Write, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use petaldoc_markup::convert;

const CONTROL_PAGE: &str = r#"# DaisyButton

Buttons allow the user to take actions or make choices.

**Inherits from:** `Button`

![DaisyButton](images/DaisyButton.png)

## Properties

| Property | Type | Default | Description |
|----------|------|---------|-------------|
| Variant | `DaisyButtonVariant` | Default | Gets or sets the color variant. |
| Size | `DaisySize` | Medium | Gets or sets the size of the button. |

## Usage Examples

### Colors

```xml
<controls:DaisyButton Variant="Primary" Content="Primary"/>
<controls:DaisyButton Variant="Secondary" Content="Secondary"/>
```

- See [DaisyBadge](DaisyBadge.md)
- See [Repository](https://github.com/example/repo)
"#;

fn large_document(sections: usize) -> String {
  let mut doc = String::new();
  for i in 0..sections {
    write!(doc, "{CONTROL_PAGE}\n\n## Section {i}\n\n").unwrap();
  }
  doc
}

fn bench_convert(c: &mut Criterion) {
  let mut group = c.benchmark_group("convert");

  group.bench_function("control_page", |b| {
    b.iter(|| convert(black_box(CONTROL_PAGE), black_box(1)));
  });

  for sections in [10, 100] {
    let doc = large_document(sections);
    group.bench_with_input(
      BenchmarkId::new("large_document", sections),
      &doc,
      |b, doc| b.iter(|| convert(black_box(doc), black_box(1))),
    );
  }

  group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
