/// Prefix that leads from a page `depth` directories below the site root
/// back to the root: `""` at the root, `"../"` one level down.
#[must_use]
pub fn root_prefix(depth: usize) -> String {
  "../".repeat(depth)
}
