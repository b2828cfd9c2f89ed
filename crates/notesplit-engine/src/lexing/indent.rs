/// Measures a line's indentation in spaces.
///
/// Counts leading spaces; when there are none, counts leading tabs at four
/// spaces each. Lines mixing tabs and spaces are not validated — spaces win
/// when both could apply.
pub fn indentation_level(line: &str) -> usize {
    let spaces = line.len() - line.trim_start_matches(' ').len();
    if spaces > 0 {
        return spaces;
    }
    let tabs = line.len() - line.trim_start_matches('\t').len();
    tabs * 4
}
