// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Evaluation of a compiled path against a JSON document

use std::cmp::Ordering;

use serde_json::Value;

use crate::parser::{CmpOp, Filter, Operand, Path, Segment, Selector};

/// Evaluate `path` against `root`, returning matched nodes in document order
pub(crate) fn evaluate<'v>(path: &Path, root: &'v Value) -> Vec<&'v Value> {
    apply_segments(&path.segments, vec![root], root)
}

fn apply_segments<'v>(segments: &[Segment], start: Vec<&'v Value>, root: &'v Value) -> Vec<&'v Value> {
    segments.iter().fold(start, |nodes, segment| {
        let mut out = Vec::new();
        for node in nodes {
            match segment {
                Segment::Child(selectors) => select_all(selectors, node, root, &mut out),
                Segment::Descendant(selectors) => {
                    let mut visit = Vec::new();
                    descendants(node, &mut visit);
                    for n in visit {
                        select_all(selectors, n, root, &mut out);
                    }
                }
            }
        }
        out
    })
}

/// Collect `node` and every node beneath it, pre-order
fn descendants<'v>(node: &'v Value, out: &mut Vec<&'v Value>) {
    out.push(node);
    match node {
        Value::Array(items) => items.iter().for_each(|v| descendants(v, out)),
        Value::Object(map) => map.values().for_each(|v| descendants(v, out)),
        _ => {}
    }
}

fn select_all<'v>(selectors: &[Selector], node: &'v Value, root: &'v Value, out: &mut Vec<&'v Value>) {
    for selector in selectors {
        select(selector, node, root, out);
    }
}

fn select<'v>(selector: &Selector, node: &'v Value, root: &'v Value, out: &mut Vec<&'v Value>) {
    match selector {
        Selector::Name(name) => {
            if let Some(v) = node.as_object().and_then(|m| m.get(name)) {
                out.push(v);
            }
        }
        Selector::Wildcard => children(node, out),
        Selector::Index(i) => {
            if let Some(items) = node.as_array()
                && let Some(idx) = normalize_index(*i, items.len())
            {
                out.push(&items[idx]);
            }
        }
        Selector::Slice { start, end, step } => {
            if let Some(items) = node.as_array() {
                for idx in slice_indices(*start, *end, *step, items.len()) {
                    out.push(&items[idx]);
                }
            }
        }
        Selector::Filter(filter) => {
            let mut candidates = Vec::new();
            children(node, &mut candidates);
            out.extend(candidates.into_iter().filter(|c| test(filter, c, root)));
        }
    }
}

fn children<'v>(node: &'v Value, out: &mut Vec<&'v Value>) {
    match node {
        Value::Array(items) => out.extend(items.iter()),
        Value::Object(map) => out.extend(map.values()),
        _ => {}
    }
}

fn normalize_index(i: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let idx = if i < 0 { len + i } else { i };
    if (0..len).contains(&idx) {
        usize::try_from(idx).ok()
    } else {
        None
    }
}

/// Array slice indices with Python semantics; a zero step selects nothing
fn slice_indices(start: Option<i64>, end: Option<i64>, step: Option<i64>, len: usize) -> Vec<usize> {
    let step = step.unwrap_or(1);
    let Ok(len) = i64::try_from(len) else {
        return Vec::new();
    };
    if step == 0 {
        return Vec::new();
    }

    let bound = |v: i64, lo: i64, hi: i64| {
        let v = if v < 0 { v + len } else { v };
        v.clamp(lo, hi)
    };

    let mut indices = Vec::new();
    if step > 0 {
        let mut i = start.map_or(0, |s| bound(s, 0, len));
        let stop = end.map_or(len, |e| bound(e, 0, len));
        while i < stop {
            indices.push(i);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
    } else {
        let mut i = start.map_or(len - 1, |s| bound(s, -1, len - 1));
        let stop = end.map_or(-1, |e| bound(e, -1, len - 1));
        while i > stop {
            indices.push(i);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
    }
    indices
        .into_iter()
        .filter_map(|i| usize::try_from(i).ok())
        .collect()
}

fn test(filter: &Filter, current: &Value, root: &Value) -> bool {
    match filter {
        Filter::Or(a, b) => test(a, current, root) || test(b, current, root),
        Filter::And(a, b) => test(a, current, root) && test(b, current, root),
        Filter::Not(inner) => !test(inner, current, root),
        Filter::Exists(operand) => match operand {
            Operand::Literal(_) => false,
            Operand::Current(segments) => !apply_segments(segments, vec![current], root).is_empty(),
            Operand::Root(segments) => !apply_segments(segments, vec![root], root).is_empty(),
        },
        Filter::Compare(left, op, right) => {
            let left = resolve(left, current, root);
            let right = resolve(right, current, root);
            compare(left, *op, right)
        }
    }
}

/// Resolve an operand to a single value; paths yielding zero or several nodes resolve to nothing
fn resolve<'v>(operand: &'v Operand, current: &'v Value, root: &'v Value) -> Option<&'v Value> {
    let nodes = match operand {
        Operand::Literal(v) => return Some(v),
        Operand::Current(segments) => apply_segments(segments, vec![current], root),
        Operand::Root(segments) => apply_segments(segments, vec![root], root),
    };
    match nodes.as_slice() {
        [single] => Some(*single),
        _ => None,
    }
}

fn compare(left: Option<&Value>, op: CmpOp, right: Option<&Value>) -> bool {
    match op {
        CmpOp::Eq => equal(left, right),
        CmpOp::Ne => !equal(left, right),
        CmpOp::Lt => order(left, right) == Some(Ordering::Less),
        CmpOp::Gt => order(left, right) == Some(Ordering::Greater),
        CmpOp::Le => matches!(order(left, right), Some(Ordering::Less | Ordering::Equal)),
        CmpOp::Ge => matches!(order(left, right), Some(Ordering::Greater | Ordering::Equal)),
    }
}

fn equal(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn order(left: Option<&Value>, right: Option<&Value>) -> Option<Ordering> {
    match (left?, right?) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
