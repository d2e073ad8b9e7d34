use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use touchlock::RawSample;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceSample {
    pub t_ms: u64,
    pub sample: RawSample,
}

pub fn load(path: &Path) -> Result<Vec<TraceSample>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing {}", path.display()))
}

/// One `<t_ms> <mask>` line per poll; the mask lists Up, Right, Down, Left,
/// Center as `0`/`1`. Blank lines and `#` comments are skipped.
pub fn parse(text: &str) -> Result<Vec<TraceSample>> {
    let mut samples = Vec::new();
    let mut last_ms: Option<u64> = None;
    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(t_field), Some(mask), None) = (fields.next(), fields.next(), fields.next())
        else {
            bail!("line {line_no}: expected `<t_ms> <mask>`");
        };
        let t_ms: u64 = t_field
            .parse()
            .with_context(|| format!("line {line_no}: bad timestamp `{t_field}`"))?;
        if last_ms.is_some_and(|last| t_ms < last) {
            bail!("line {line_no}: timestamp {t_ms} goes backwards");
        }
        last_ms = Some(t_ms);

        samples.push(TraceSample {
            t_ms,
            sample: parse_mask(mask).with_context(|| format!("line {line_no}"))?,
        });
    }
    Ok(samples)
}

fn parse_mask(mask: &str) -> Result<RawSample> {
    let bytes = mask.as_bytes();
    if bytes.len() != 5 {
        bail!("mask `{mask}` must have 5 characters");
    }
    let mut touched = [false; 5];
    for (slot, byte) in touched.iter_mut().zip(bytes) {
        *slot = match byte {
            b'0' => false,
            b'1' => true,
            other => bail!("mask `{mask}` has invalid character `{}`", *other as char),
        };
    }
    Ok(RawSample::new(touched))
}
