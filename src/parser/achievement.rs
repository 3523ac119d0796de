//! Achievement dialect.
//!
//! ```text
//! [ACH-NAME]Double Date
//! [ACH-DESC]Play two Boyfriends and hold a Girlfriend
//! [ACH-CODE]USE 2 Boyfriend
//! [ACH-CODE]WAIT Girlfriend
//! [ACH-REWARD]Ring
//! ```
//!
//! Codes are sorted into families by their first word:
//!
//! ```text
//! statistic := (PLAY | WIN | LOSE | DRAW | STREAK) count? qualifier?
//! round     := (USE | WAIT) count? (suit | special | value)
//! score     := (FRIENDLY | ENEMY)? scope op? target
//! scope     := suit | EACH | ANY | ONE | TOTAL | ONLY suit
//! target    := WIN | LOSE | DRAW | integer | suit
//! ```

use super::{tokenize, Diagnostics, Parsed};
use crate::achievements::{
    Achievement, AchievementCriterion, RoundKind, RoundTarget, ScoreOp, ScoreScope, ScoreSide,
    ScoreTarget, StatKind,
};

fn split_count<'a>(words: &'a [&'a str]) -> (Option<usize>, &'a [&'a str]) {
    match words.split_first() {
        Some((first, rest)) => match first.parse::<usize>() {
            Ok(count) => (Some(count), rest),
            Err(_) => (None, words),
        },
        None => (None, words),
    }
}

fn statistic(stat: StatKind, rest: &[&str], diag: &mut Diagnostics) -> Option<AchievementCriterion> {
    let (count, rest) = split_count(rest);
    let count = count.unwrap_or(1);
    let Ok(count) = u32::try_from(count) else {
        diag.warn(format!("statistic count {} is too large", count));
        return None;
    };
    Some(AchievementCriterion::Statistic {
        stat,
        count,
        qualifier: (!rest.is_empty()).then(|| rest.join(" ")),
    })
}

fn round(kind: RoundKind, rest: &[&str], diag: &mut Diagnostics) -> Option<AchievementCriterion> {
    let (count, rest) = split_count(rest);
    let target = match rest {
        [] => {
            // A lone number is the value to look for, not a count.
            let Some(value) = count else {
                diag.warn(format!("{:?} code without a card", kind));
                return None;
            };
            return Some(AchievementCriterion::Round {
                kind,
                count: 1,
                target: RoundTarget::Value(value as i32),
            });
        }
        [word] => match word.parse::<i32>() {
            Ok(value) => RoundTarget::Value(value),
            Err(_) => RoundTarget::Name((*word).to_string()),
        },
        words => RoundTarget::Name(words.join(" ")),
    };
    Some(AchievementCriterion::Round {
        kind,
        count: count.unwrap_or(1),
        target,
    })
}

fn score(words: &[&str], diag: &mut Diagnostics) -> Option<AchievementCriterion> {
    let (side, rest) = match words.split_first() {
        Some((first, rest)) if first.eq_ignore_ascii_case("FRIENDLY") => (ScoreSide::Friendly, rest),
        Some((first, rest)) if first.eq_ignore_ascii_case("ENEMY") => (ScoreSide::Enemy, rest),
        _ => (ScoreSide::Friendly, words),
    };

    let Some((first, rest)) = rest.split_first() else {
        diag.warn("score code without a scope");
        return None;
    };
    let (scope, rest) = match first.to_ascii_uppercase().as_str() {
        "EACH" => (ScoreScope::Each, rest),
        "ANY" => (ScoreScope::Any, rest),
        "ONE" => (ScoreScope::One, rest),
        "TOTAL" => (ScoreScope::Total, rest),
        "ONLY" => {
            let Some((suit, rest)) = rest.split_first() else {
                diag.warn("ONLY without a suit");
                return None;
            };
            (ScoreScope::Only((*suit).to_string()), rest)
        }
        _ => (ScoreScope::Suit((*first).to_string()), rest),
    };

    // The operator may be its own word or glued to the target.
    let joined = rest.join(" ");
    let text = joined.trim();
    let op_len = text.chars().take_while(|c| "<>=".contains(*c)).count();
    let (op_text, target_text) = text.split_at(op_len);
    let op = match op_text {
        "" | ">=" => ScoreOp::AtLeast,
        "<" => ScoreOp::Less,
        "=" | "==" => ScoreOp::Equal,
        other => {
            diag.warn(format!("unknown score operator '{}'", other));
            return None;
        }
    };

    let target_text = target_text.trim();
    let target = match target_text.to_ascii_uppercase().as_str() {
        "" => {
            diag.warn("score code without a target");
            return None;
        }
        "WIN" => ScoreTarget::Win,
        "LOSE" => ScoreTarget::Lose,
        "DRAW" => ScoreTarget::Draw,
        _ => match target_text.parse::<i32>() {
            Ok(points) => ScoreTarget::Points(points),
            Err(_) => ScoreTarget::Suit(target_text.to_string()),
        },
    };

    Some(AchievementCriterion::Score {
        side,
        scope,
        op,
        target,
    })
}

/// Parse one achievement code. Unreadable codes yield `None`.
#[must_use]
pub fn parse_criterion(code: &str) -> Parsed<Option<AchievementCriterion>> {
    let mut diag = Diagnostics::default();
    let words: Vec<&str> = code.split_whitespace().collect();
    let value = match words.split_first() {
        None => {
            diag.warn("empty achievement code");
            None
        }
        Some((first, rest)) => match first.to_ascii_uppercase().as_str() {
            "PLAY" => statistic(StatKind::Play, rest, &mut diag),
            "WIN" => statistic(StatKind::Win, rest, &mut diag),
            "LOSE" => statistic(StatKind::Lose, rest, &mut diag),
            "DRAW" => statistic(StatKind::Draw, rest, &mut diag),
            "STREAK" => statistic(StatKind::Streak, rest, &mut diag),
            "USE" => round(RoundKind::Use, rest, &mut diag),
            "WAIT" => round(RoundKind::Wait, rest, &mut diag),
            _ => score(&words, &mut diag),
        },
    };
    diag.finish(value)
}

#[derive(Default)]
struct PendingAchievement {
    name: Option<String>,
    description: String,
    criteria: Vec<AchievementCriterion>,
    started: bool,
}

impl PendingAchievement {
    fn finish(self, reward: Option<String>, diag: &mut Diagnostics) -> Option<Achievement> {
        let Some(name) = self.name else {
            diag.warn("achievement without ACH-NAME; dropped");
            return None;
        };
        if self.criteria.is_empty() {
            diag.warn(format!("achievement '{}' has no usable ACH-CODE; dropped", name));
            return None;
        }
        let rounds = self.criteria.iter().filter(|c| c.is_round()).count();
        if rounds != 0 && rounds != self.criteria.len() {
            diag.warn(format!(
                "achievement '{}' mixes round and game codes; it can never be reached",
                name
            ));
        }
        Some(Achievement {
            name,
            description: self.description,
            criteria: self.criteria,
            reward,
        })
    }
}

/// Parse an achievement file.
#[must_use]
pub fn parse_achievements(text: &str) -> Parsed<Vec<Achievement>> {
    let tokens = tokenize(text);
    let mut diag = Diagnostics::default();
    diag.absorb(tokens.warnings);

    let mut achievements = Vec::new();
    let mut pending = PendingAchievement::default();

    for line in tokens.value {
        diag.at_line(line.number);
        match line.tag.as_str() {
            "ACH-NAME" => {
                if pending.started {
                    diag.warn("previous achievement has no ACH-REWARD");
                    achievements.extend(std::mem::take(&mut pending).finish(None, &mut diag));
                }
                pending.started = true;
                pending.name = Some(line.value);
            }
            "ACH-DESC" => {
                pending.started = true;
                pending.description = line.value;
            }
            "ACH-CODE" => {
                pending.started = true;
                let parsed = parse_criterion(&line.value);
                diag.absorb(parsed.warnings);
                pending.criteria.extend(parsed.value);
            }
            "ACH-REWARD" => {
                let reward = (!line.value.is_empty()).then_some(line.value);
                achievements.extend(std::mem::take(&mut pending).finish(reward, &mut diag));
            }
            other => diag.warn(format!("unknown achievement tag '{}'", other)),
        }
    }

    if pending.started {
        diag.warn("last achievement has no ACH-REWARD");
        achievements.extend(pending.finish(None, &mut diag));
    }
    diag.finish(achievements)
}
