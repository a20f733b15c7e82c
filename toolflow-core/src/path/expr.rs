use std::borrow::Cow;
use std::fmt;

use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    pub index: Option<usize>,
    raw: String,
}

impl PathSegment {
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// A dotted path such as `ideas[0].title`.
///
/// The empty path selects the root value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    raw: String,
    segments: Vec<PathSegment>,
}

impl PathExpr {
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let segments = if input.is_empty() {
            Vec::new()
        } else {
            input
                .split('.')
                .map(parse_segment)
                .collect::<Result<Vec<_>, _>>()?
        };
        Ok(Self {
            raw: input.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk `root` one segment at a time.
    ///
    /// `Ok(None)` means the path ended on a missing property. A plain segment applied to an
    /// array projects that property out of every element; elements lacking it become `null`.
    pub fn resolve(&self, root: &JsonValue) -> Result<Option<JsonValue>, PathError> {
        let mut acc: Option<Cow<'_, JsonValue>> = Some(Cow::Borrowed(root));
        for seg in &self.segments {
            acc = match seg.index {
                None => step_plain(acc, seg)?,
                Some(idx) => Some(step_indexed(acc, seg, idx)?),
            };
        }
        Ok(acc.map(Cow::into_owned))
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse `path` and resolve it against `root`.
pub fn resolve(root: &JsonValue, path: &str) -> Result<Option<JsonValue>, PathError> {
    PathExpr::parse(path)?.resolve(root)
}

fn parse_segment(raw: &str) -> Result<PathSegment, PathError> {
    let malformed = || PathError::Malformed {
        segment: raw.to_string(),
    };

    let Some(open) = raw.find('[') else {
        if raw.is_empty() || raw.contains(']') {
            return Err(malformed());
        }
        return Ok(PathSegment {
            name: raw.to_string(),
            index: None,
            raw: raw.to_string(),
        });
    };

    let name = &raw[..open];
    let digits = raw[open + 1..].strip_suffix(']').ok_or_else(malformed)?;
    if name.contains(']') || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let index = digits.parse::<usize>().map_err(|_| malformed())?;

    Ok(PathSegment {
        name: name.to_string(),
        index: Some(index),
        raw: raw.to_string(),
    })
}

fn resolution_failed(seg: &PathSegment) -> PathError {
    PathError::PathResolutionFailed {
        segment: seg.raw.clone(),
    }
}

fn step_plain<'a>(
    acc: Option<Cow<'a, JsonValue>>,
    seg: &PathSegment,
) -> Result<Option<Cow<'a, JsonValue>>, PathError> {
    match acc {
        None => Err(resolution_failed(seg)),
        Some(v) if v.is_null() => Err(resolution_failed(seg)),
        Some(v) => Ok(project(v, &seg.name)),
    }
}

fn step_indexed<'a>(
    acc: Option<Cow<'a, JsonValue>>,
    seg: &PathSegment,
    idx: usize,
) -> Result<Cow<'a, JsonValue>, PathError> {
    let acc = acc
        .filter(|v| !v.is_null())
        .ok_or_else(|| resolution_failed(seg))?;

    // `[n]` with no name indexes the accumulator itself.
    let target = if seg.name.is_empty() {
        Some(acc)
    } else {
        property(acc, &seg.name)
    };

    let element = match target {
        Some(Cow::Borrowed(JsonValue::Array(items))) => items.get(idx).map(Cow::Borrowed),
        Some(Cow::Owned(JsonValue::Array(mut items))) if idx < items.len() => {
            Some(Cow::Owned(items.swap_remove(idx)))
        }
        _ => None,
    };
    element.ok_or_else(|| resolution_failed(seg))
}

fn property<'a>(acc: Cow<'a, JsonValue>, name: &str) -> Option<Cow<'a, JsonValue>> {
    match acc {
        Cow::Borrowed(JsonValue::Object(map)) => map.get(name).map(Cow::Borrowed),
        Cow::Owned(JsonValue::Object(mut map)) => map.remove(name).map(Cow::Owned),
        _ => None,
    }
}

fn project<'a>(acc: Cow<'a, JsonValue>, name: &str) -> Option<Cow<'a, JsonValue>> {
    if let JsonValue::Array(items) = acc.as_ref() {
        let projected = items
            .iter()
            .map(|item| item.get(name).cloned().unwrap_or(JsonValue::Null))
            .collect();
        return Some(Cow::Owned(JsonValue::Array(projected)));
    }
    property(acc, name)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path resolution failed at segment '{segment}'")]
    PathResolutionFailed { segment: String },
    #[error("malformed path segment '{segment}'")]
    Malformed { segment: String },
}

impl PathError {
    pub fn segment(&self) -> &str {
        match self {
            PathError::PathResolutionFailed { segment } | PathError::Malformed { segment } => {
                segment
            }
        }
    }
}
