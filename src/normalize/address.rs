/// Join the non-empty address parts with ", ". `None` and `""` are treated
/// identically; fixed suffixes (a state abbreviation, say) are just passed
/// as trailing parts.
pub fn join_parts(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}
