use cube_core::{Face, RotationAmount};
use internment::ArcIntern;
use itertools::Itertools;
use log::{debug, trace};
use pest::{
    Parser,
    error::{Error, ErrorVariant, InputLocation, LineColLocation},
    iterators::Pair,
};
use pest_derive::Parser;
use thiserror::Error;

use crate::{
    algorithm::{Algorithm, CubeRotation, Move, MoveKind, SliceMove},
    span::{Span, WithSpan, mk_error},
};

#[derive(Parser)]
#[grammar = "./notation.pest"]
struct NotationParser;

/// The text did not match the notation grammar.
///
/// This is an ordinary value: a caller doing live validation checks for it
/// before asking for any actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{rendered}")]
pub struct ParseFailure {
    /// Byte offset of the first character that could not be matched
    pub position: usize,
    pub line: usize,
    pub col: usize,
    /// What was expected at `position`, e.g. "expected a modifier or whitespace"
    pub description: String,
    /// A pest diagnostic with the offending line and a caret
    pub rendered: String,
}

impl ParseFailure {
    fn from_pest(err: Error<Rule>) -> ParseFailure {
        let description = match &err.variant {
            ErrorVariant::ParsingError { positives, .. } if positives.is_empty() => {
                "unexpected input".to_owned()
            }
            ErrorVariant::ParsingError { positives, .. } => format!(
                "expected {}",
                positives.iter().map(|rule| describe(*rule)).unique().join(" or ")
            ),
            ErrorVariant::CustomError { message } => message.clone(),
        };

        let position = match err.location {
            InputLocation::Pos(pos) | InputLocation::Span((pos, _)) => pos,
        };

        let (line, col) = match err.line_col {
            LineColLocation::Pos(line_col) | LineColLocation::Span(line_col, _) => line_col,
        };

        let rendered = err
            .renamed_rules(|rule| describe(*rule).to_owned())
            .to_string();

        ParseFailure {
            position,
            line,
            col,
            description,
            rendered,
        }
    }
}

fn describe(rule: Rule) -> &'static str {
    match rule {
        Rule::algorithm | Rule::turn => "a move",
        Rule::separator => "whitespace",
        Rule::wide_move => "a wide move",
        Rule::depth => "a layer count",
        Rule::subscript => "a layer subscript",
        Rule::wide_marker => "the wide marker `w`",
        Rule::face_letter | Rule::face_move => "a face letter",
        Rule::wide_letter => "a wide face letter",
        Rule::slice_move => "a slice letter",
        Rule::rotation_move => "a whole cube rotation",
        Rule::modifier => "a modifier",
        Rule::EOI => "the end of the input",
    }
}

/// Match `text` against the notation grammar. No cube is involved, so this
/// can run on every keystroke.
///
/// # Errors
///
/// `ParseFailure` if the text is not one or more whitespace separated moves
pub fn parse_algorithm(text: &str) -> Result<Algorithm, ParseFailure> {
    let pairs = NotationParser::parse(Rule::algorithm, text).map_err(ParseFailure::from_pest)?;
    let source = ArcIntern::<str>::from(text);

    let mut moves = Vec::new();

    for pair in pairs.flatten().filter(|pair| pair.as_rule() == Rule::turn) {
        let pest_span = pair.as_span();
        let span = Span::new(ArcIntern::clone(&source), pest_span.start(), pest_span.end());

        let Some(mv) = parse_turn(pair) else {
            let err = mk_error::<Rule>(format!("unrecognized move `{}`", span.slice()), &span);
            return Err(ParseFailure::from_pest(*err));
        };

        trace!("Parsed {mv:?} from `{}`", span.slice());
        moves.push(WithSpan::new(mv, span));
    }

    debug!("Matched {} moves", moves.len());

    Ok(Algorithm::new(moves))
}

fn parse_turn(pair: Pair<'_, Rule>) -> Option<Move> {
    let mut kind = None;
    let mut turns = RotationAmount::Clockwise;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::wide_move => kind = Some(parse_wide(part)?),
            Rule::face_move => {
                kind = Some(MoveKind::Face(letter_of(&part).and_then(Face::from_letter)?));
            }
            Rule::slice_move => {
                kind = Some(MoveKind::Slice(letter_of(&part).and_then(SliceMove::from_letter)?));
            }
            Rule::rotation_move => {
                kind = Some(MoveKind::Rotation(
                    letter_of(&part).and_then(CubeRotation::from_letter)?,
                ));
            }
            Rule::modifier => {
                turns = match part.as_str() {
                    "'" => RotationAmount::CounterClockwise,
                    "2" => RotationAmount::Halfway,
                    _ => return None,
                };
            }
            _ => return None,
        }
    }

    Some(Move { kind: kind?, turns })
}

fn parse_wide(pair: Pair<'_, Rule>) -> Option<MoveKind> {
    let mut face = None;
    let mut depth = 1;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::depth => depth = part.as_str().parse().ok()?,
            Rule::subscript => depth = part.as_str().trim_start_matches('_').parse().ok()?,
            Rule::face_letter => face = letter_of(&part).and_then(Face::from_letter),
            Rule::wide_letter => {
                face = letter_of(&part)
                    .map(|letter| letter.to_ascii_uppercase())
                    .and_then(Face::from_letter);
            }
            Rule::wide_marker => {}
            _ => return None,
        }
    }

    Some(MoveKind::Wide { face: face?, depth })
}

fn letter_of(pair: &Pair<'_, Rule>) -> Option<char> {
    pair.as_str().chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(MoveKind, RotationAmount)> {
        parse_algorithm(text)
            .unwrap()
            .moves()
            .iter()
            .map(|mv| (mv.kind, mv.turns))
            .collect()
    }

    #[test_log::test]
    fn face_moves_and_modifiers() {
        assert_eq!(
            kinds("F R' U2"),
            vec![
                (MoveKind::Face(Face::Front), RotationAmount::Clockwise),
                (MoveKind::Face(Face::Right), RotationAmount::CounterClockwise),
                (MoveKind::Face(Face::Top), RotationAmount::Halfway),
            ]
        );
    }

    #[test_log::test]
    fn wide_spellings_agree() {
        let wide = (
            MoveKind::Wide {
                face: Face::Right,
                depth: 1,
            },
            RotationAmount::Clockwise,
        );

        for text in ["r", "Rw", "1Rw", "1R", "R_1"] {
            assert_eq!(kinds(text), vec![wide], "{text}");
        }

        let deep = MoveKind::Wide {
            face: Face::Bottom,
            depth: 3,
        };

        assert_eq!(kinds("3D'")[0], (deep, RotationAmount::CounterClockwise));
        assert_eq!(kinds("3Dw2")[0], (deep, RotationAmount::Halfway));
        assert_eq!(kinds("D_3")[0], (deep, RotationAmount::Clockwise));
    }

    #[test_log::test]
    fn slices_and_rotations() {
        assert_eq!(
            kinds("M E' S2 x Y'"),
            vec![
                (MoveKind::Slice(SliceMove::M), RotationAmount::Clockwise),
                (MoveKind::Slice(SliceMove::E), RotationAmount::CounterClockwise),
                (MoveKind::Slice(SliceMove::S), RotationAmount::Halfway),
                (MoveKind::Rotation(CubeRotation::X), RotationAmount::Clockwise),
                (MoveKind::Rotation(CubeRotation::Y), RotationAmount::CounterClockwise),
            ]
        );
    }

    #[test_log::test]
    fn spans_cover_each_move() {
        let algorithm = parse_algorithm("R  2Uw'\nM2").unwrap();
        let spans = algorithm
            .moves()
            .iter()
            .map(|mv| (mv.span().slice(), mv.span().line_and_col()))
            .collect::<Vec<_>>();

        assert_eq!(spans, vec![("R", (1, 1)), ("2Uw'", (1, 4)), ("M2", (2, 1))]);
    }

    #[test_log::test]
    fn failures_report_position() {
        let failure = parse_algorithm("R U Q").unwrap_err();
        assert_eq!(failure.position, 4);
        assert_eq!((failure.line, failure.col), (1, 5));
        assert!(failure.description.starts_with("expected"), "{failure:?}");
        assert!(failure.rendered.contains("R U Q"), "{}", failure.rendered);

        let failure = parse_algorithm("RU").unwrap_err();
        assert_eq!(failure.position, 1);

        let failure = parse_algorithm("R w").unwrap_err();
        assert_eq!(failure.position, 2);
    }

    #[test]
    fn empty_input_does_not_match() {
        assert_eq!(parse_algorithm("").unwrap_err().position, 0);
        assert_eq!(parse_algorithm("  \n ").unwrap_err().position, 4);
    }

    #[test]
    fn zero_depth_does_not_match() {
        assert!(parse_algorithm("0Rw").is_err());
        assert!(parse_algorithm("R_0").is_err());
        assert!(parse_algorithm("R__2").is_err());
    }
}
