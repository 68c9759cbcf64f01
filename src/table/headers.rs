//! Turn the flattened header cells of a table into a flat, unique column list.
//!
//! Tables on the season page come in three header layouts:
//!
//! * one flat row (standings, per game, per 100 possessions);
//! * two rows where the same label appears once under "Offense Four Factors"
//!   and once under "Defense Four Factors" (advanced);
//! * two rows where short labels like `2P`, `3P`, `Md.` repeat under several
//!   parents (shooting).
//!
//! The site relies on position, not names, so every mode ends by making the
//! remaining names unique.

use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::error::{Result, ScrapeError};

/// A label that appears once in the offensive and once in the defensive group.
#[derive(Debug, Clone, Copy)]
pub struct OffDefLabel {
    pub raw: &'static str,
    pub offense: &'static str,
    pub defense: &'static str,
}

/// A parent header and the sub-labels it spans, in column order.
#[derive(Debug, Clone, Copy)]
pub struct HeaderGroup {
    pub parent: &'static str,
    pub subs: &'static [&'static str],
}

pub const FOUR_FACTOR_LABELS: &[OffDefLabel] = &[
    OffDefLabel {
        raw: "eFG%",
        offense: "Off eFG%",
        defense: "Def eFG%",
    },
    OffDefLabel {
        raw: "TOV%",
        offense: "Off TOV%",
        defense: "Def TOV%",
    },
    OffDefLabel {
        raw: "FT/FGA",
        offense: "Off FT/FGA%",
        defense: "Def FT/FGA%",
    },
];

const DISTANCES: &[&str] = &["2P", "0-3", "3-10", "10-16", "16-3P", "3P"];

/// Order matters: sub-labels repeat across parents and each pass claims the
/// first unclaimed match.
pub const SHOOTING_GROUPS: &[HeaderGroup] = &[
    HeaderGroup {
        parent: "% of FGA By Distance",
        subs: DISTANCES,
    },
    HeaderGroup {
        parent: "FG% By Distance",
        subs: DISTANCES,
    },
    HeaderGroup {
        parent: "% of FG Ast'd",
        subs: &["2P", "3P"],
    },
    HeaderGroup {
        parent: "Dunks",
        subs: &["%FGA", "Md."],
    },
    HeaderGroup {
        parent: "Layups",
        subs: &["%FGA", "Md."],
    },
    HeaderGroup {
        parent: "Corner",
        subs: &["%3PA", "3P%"],
    },
    HeaderGroup {
        parent: "Heaves",
        subs: &["Att.", "Md."],
    },
];

/// Cells containing this text are division captions, not columns.
pub const DIVISION_MARKER: &str = "Division";

#[derive(Debug, Clone, Copy)]
pub enum HeaderMode {
    /// Already flat; drop cells containing any of the markers.
    Simple { drop_containing: &'static [&'static str] },
    /// Skip a rank/index prefix, then label repeated offense/defense columns.
    OffDef {
        skip: usize,
        labels: &'static [OffDefLabel],
    },
    /// Prefix sub-labels with their parent, then cut everything before `anchor`.
    Grouped {
        groups: &'static [HeaderGroup],
        anchor: &'static str,
    },
}

impl HeaderMode {
    /// How many leading raw rows repeat the header.
    pub fn header_rows(&self) -> usize {
        match self {
            HeaderMode::Simple { .. } => 1,
            HeaderMode::OffDef { .. } | HeaderMode::Grouped { .. } => 2,
        }
    }
}

/// Ordered column names; non-empty names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    names: Vec<String>,
}

impl ColumnSchema {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn reconcile(headers: &[String], mode: &HeaderMode) -> Result<ColumnSchema> {
    let names = match mode {
        HeaderMode::Simple { drop_containing } => headers
            .iter()
            .filter(|h| !drop_containing.iter().any(|m| h.contains(m)))
            .cloned()
            .collect(),
        HeaderMode::OffDef { skip, labels } => {
            if headers.len() < *skip {
                return Err(ScrapeError::schema(format!(
                    "expected at least {} header cells, found {}",
                    skip,
                    headers.len()
                )));
            }
            label_off_def(&headers[*skip..], labels)?
        }
        HeaderMode::Grouped { groups, anchor } => combine_groups(headers, groups, anchor)?,
    };
    Ok(ColumnSchema {
        names: make_unique(names),
    })
}

/// First occurrence of each label is offensive, second is defensive.
///
/// Pass one records where each ambiguous label occurs; pass two writes the
/// labelled copy. The input is never modified.
pub fn label_off_def(headers: &[String], labels: &[OffDefLabel]) -> Result<Vec<String>> {
    let occurrences: Vec<Vec<usize>> = labels
        .iter()
        .map(|label| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| h.as_str() == label.raw)
                .map(|(i, _)| i)
                .collect()
        })
        .collect();

    let mut out = headers.to_vec();
    for (label, positions) in labels.iter().zip(&occurrences) {
        match positions.as_slice() {
            [off, def, rest @ ..] => {
                if !rest.is_empty() {
                    warn!(label = label.raw, extra = rest.len(), "label repeats more than twice");
                }
                out[*off] = label.offense.to_string();
                out[*def] = label.defense.to_string();
            }
            _ => {
                return Err(ScrapeError::schema(format!(
                    "expected '{}' twice (offense and defense), found {}",
                    label.raw,
                    positions.len()
                )))
            }
        }
    }
    Ok(out)
}

/// Rewrite each sub-label to `"parent - sub"`, group by group, then keep
/// only the headers from `anchor` onwards.
///
/// A sub-label that is already combined counts as satisfied, so running
/// this on its own output changes nothing.
pub fn combine_groups(headers: &[String], groups: &[HeaderGroup], anchor: &str) -> Result<Vec<String>> {
    let mut out = headers.to_vec();
    let mut claimed = vec![false; out.len()];

    for group in groups {
        for sub in group.subs {
            let combined = format!("{} - {}", group.parent, sub);
            let hit = (0..out.len()).find(|&i| !claimed[i] && out[i] == *sub);
            match hit {
                Some(i) => {
                    out[i] = combined;
                    claimed[i] = true;
                }
                None if out.contains(&combined) => {}
                None => {
                    return Err(ScrapeError::schema(format!(
                        "sub-header '{}' under '{}' not found",
                        sub, group.parent
                    )))
                }
            }
        }
    }

    let start = out
        .iter()
        .position(|h| h == anchor)
        .ok_or_else(|| ScrapeError::schema(format!("anchor header '{}' not found", anchor)))?;
    Ok(out.split_off(start))
}

/// Suffix repeated non-empty names with `.1`, `.2`, … in order of appearance.
pub fn make_unique(names: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> =
        names.iter().filter(|n| !n.is_empty()).cloned().collect();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        if name.is_empty() {
            out.push(name);
            continue;
        }
        let count = seen.entry(name.clone()).or_insert(0);
        if *count == 0 {
            *count = 1;
            out.push(name);
            continue;
        }
        let mut candidate = format!("{}.{}", name, count);
        while taken.contains(&candidate) {
            *count += 1;
            candidate = format!("{}.{}", name, count);
        }
        *count += 1;
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    const ADVANCED: HeaderMode = HeaderMode::OffDef {
        skip: 5,
        labels: FOUR_FACTOR_LABELS,
    };

    const SHOOTING: HeaderMode = HeaderMode::Grouped {
        groups: SHOOTING_GROUPS,
        anchor: "Rk",
    };

    fn shooting_headers() -> Vec<String> {
        s(&[
            "", "% of FGA by Distance", "FG% by Distance", "% of FG Ast'd", "Dunks", "Layups",
            "Corner", "Heaves", // parent row
            "Rk", "Team", "G", "MP", "FG%", "Dist.", "",
            "2P", "0-3", "3-10", "10-16", "16-3P", "3P", "",
            "2P", "0-3", "3-10", "10-16", "16-3P", "3P", "",
            "2P", "3P", "", "%FGA", "Md.", "", "%FGA", "Md.", "", "%3PA", "3P%", "", "Att.", "Md.",
        ])
    }

    #[test]
    fn simple_mode_drops_division_captions() {
        let mode = HeaderMode::Simple {
            drop_containing: &[DIVISION_MARKER],
        };
        let schema = reconcile(
            &s(&["Eastern Conference", "W", "L", "Atlantic Division", "W/L%"]),
            &mode,
        )
        .unwrap();
        assert_eq!(schema.names(), &s(&["Eastern Conference", "W", "L", "W/L%"])[..]);
    }

    #[test]
    fn advanced_labels_first_occurrence_offense_second_defense() {
        let headers = s(&[
            "", "", "", "Offense Four Factors", "Defense Four Factors", // over-header
            "Rk", "Team", "Age", "W", "L", "NRtg", "",
            "eFG%", "TOV%", "ORB%", "FT/FGA", "",
            "eFG%", "TOV%", "DRB%", "FT/FGA", "", "Arena",
        ]);
        let schema = reconcile(&headers, &ADVANCED).unwrap();
        assert_eq!(
            schema.names(),
            &s(&[
                "Rk", "Team", "Age", "W", "L", "NRtg", "",
                "Off eFG%", "Off TOV%", "ORB%", "Off FT/FGA%", "",
                "Def eFG%", "Def TOV%", "DRB%", "Def FT/FGA%", "", "Arena",
            ])[..]
        );
    }

    #[test]
    fn off_def_labelling_leaves_input_untouched() {
        let headers = s(&["eFG%", "X", "eFG%", "TOV%", "TOV%", "FT/FGA", "FT/FGA"]);
        let labelled = label_off_def(&headers, FOUR_FACTOR_LABELS).unwrap();
        assert_eq!(headers[0], "eFG%");
        assert_eq!(
            labelled,
            s(&["Off eFG%", "X", "Def eFG%", "Off TOV%", "Def TOV%", "Off FT/FGA%", "Def FT/FGA%"])
        );
    }

    #[test]
    fn missing_defensive_occurrence_is_schema_mismatch() {
        let headers = s(&["eFG%", "TOV%", "FT/FGA", "TOV%", "FT/FGA"]);
        let err = label_off_def(&headers, FOUR_FACTOR_LABELS).unwrap_err();
        assert!(matches!(err, ScrapeError::SchemaMismatch(_)));
    }

    #[test]
    fn too_few_cells_for_prefix_is_schema_mismatch() {
        assert!(reconcile(&s(&["Rk", "Team"]), &ADVANCED).is_err());
    }

    #[test]
    fn shooting_groups_rewrite_in_order_and_cut_at_rank() {
        let schema = reconcile(&shooting_headers(), &SHOOTING).unwrap();
        let names = schema.names();
        assert_eq!(names[0], "Rk");
        assert_eq!(names[7], "% of FGA By Distance - 2P");
        assert_eq!(names[12], "% of FGA By Distance - 3P");
        assert_eq!(names[14], "FG% By Distance - 2P");
        assert_eq!(names[21], "% of FG Ast'd - 2P");
        assert_eq!(names[22], "% of FG Ast'd - 3P");
        assert_eq!(names[24], "Dunks - %FGA");
        assert_eq!(names[28], "Layups - Md.");
        assert_eq!(names[31], "Corner - 3P%");
        assert_eq!(names[34], "Heaves - Md.");
        assert!(!names.iter().any(|n| n == "Dunks"));
    }

    #[test]
    fn shooting_reconciliation_is_idempotent() {
        let once = reconcile(&shooting_headers(), &SHOOTING).unwrap();
        let twice = reconcile(once.names(), &SHOOTING).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn absent_sub_label_is_schema_mismatch() {
        let mut headers = shooting_headers();
        headers.retain(|h| h != "Att.");
        let err = reconcile(&headers, &SHOOTING).unwrap_err();
        assert!(matches!(err, ScrapeError::SchemaMismatch(_)));
    }

    #[test]
    fn duplicates_get_deterministic_suffixes() {
        let names = make_unique(s(&["Team", "W", "", "W", "", "W", "W.1"]));
        assert_eq!(names, s(&["Team", "W", "", "W.2", "", "W.3", "W.1"]));
        assert_eq!(make_unique(names.clone()), names);
    }
}
