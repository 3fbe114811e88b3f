use std::ops::Range;

// "start-end", half-open.
pub fn parse_range(s: &str) -> Result<Range<usize>, String> {
    let Some((start, end)) = s.split_once('-') else {
        return Err(format!("Expected start-end, got \"{s}\""));
    };
    let start: usize = start.trim().parse().map_err(|e| format!("Bad range start \"{start}\": {e}"))?;
    let end: usize = end.trim().parse().map_err(|e| format!("Bad range end \"{end}\": {e}"))?;
    if start > end {
        return Err(format!("Range start {start} is past its end {end}"));
    }
    Ok(start..end)
}
