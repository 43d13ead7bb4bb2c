//! Bounded backtracking engine
//!
//! Parses the expression with `regex-syntax`, compiles a Thompson NFA and
//! searches with the `regex-automata` bounded backtracker, switching to the
//! PikeVM when the searched span is too long for the backtracker's visited
//! set. Both run in linear time, so the backtracking budget is charged from
//! the structure of the expression: a repetition nested inside an unbounded
//! repetition makes a failing search cost about `2^n` steps, where `n` is
//! the longest run of the subject that repetition consumes.

use once_cell::sync::Lazy;
use regex_automata::nfa::thompson::{
    self, NFA,
    backtrack::{self, BoundedBacktracker},
    pikevm::{self, PikeVM},
};
use regex_automata::util::captures::Captures;
use regex_automata::{Anchored, Input, PatternID};
use regex_syntax::hir::{Hir, HirKind, Repetition};

use super::expression::{Expression, Modifiers};
use super::{Exec, RegexEngine};
use crate::config::{ConfigResult, EngineConfig, Validator};
use crate::error::{DiagnosticTable, EngineConstant, ErrorCode};
use crate::flags::MatchFlags;
use crate::result::{Capture, GroupKey, Groups, MatchAllResult, MatchResult};

/// Revision of [`CONSTANTS`]; bump when a code is added or renamed
pub const TABLE_REVISION: u32 = 1;

/// Codes this engine reports
pub const CONSTANTS: &[EngineConstant] = &[
    EngineConstant::new("NO_ERROR", 0, "No error"),
    EngineConstant::new("INTERNAL_ERROR", 1, "Internal error"),
    EngineConstant::new("BACKTRACK_LIMIT_ERROR", 2, "Backtrack limit exhausted"),
    EngineConstant::new("RECURSION_LIMIT_ERROR", 3, "Recursion limit exhausted"),
    EngineConstant::new(
        "BAD_UTF8_ERROR",
        4,
        "Malformed UTF-8 characters, possibly incorrectly encoded",
    ),
    EngineConstant::new(
        "BAD_UTF8_OFFSET_ERROR",
        5,
        "The offset did not correspond to the beginning of a valid UTF-8 code point",
    ),
    EngineConstant::new("JIT_STACKLIMIT_ERROR", 6, "JIT stack limit exhausted"),
];

static DIAGNOSTICS: Lazy<DiagnosticTable> =
    Lazy::new(|| DiagnosticTable::from_constants(TABLE_REVISION, CONSTANTS));

/// Engine failure before it is packed into an [`Exec`]
#[derive(Debug)]
struct Fault {
    code: ErrorCode,
    detail: String,
}

impl Fault {
    fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }
}

/// Compiled form of one expression
struct Program {
    backtracker: BoundedBacktracker,
    pikevm: PikeVM,
    /// Unbounded repetitions that wrap another unbounded repetition
    hazards: Vec<PikeVM>,
    /// Group name per group index
    names: Vec<Option<String>>,
    modifiers: Modifiers,
    backtrack_limit: usize,
}

/// Per-call search state for a [`Program`]
struct Scratch {
    backtrack: backtrack::Cache,
    pike: pikevm::Cache,
    hazards: Vec<pikevm::Cache>,
    caps: Captures,
}

impl Program {
    fn input<'h>(&self, subject: &'h [u8], at: usize) -> Input<'h> {
        let anchored = if self.modifiers.anchored {
            Anchored::Yes
        } else {
            Anchored::No
        };
        Input::new(subject).span(at..subject.len()).anchored(anchored)
    }

    fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).and_then(|name| name.as_deref())
    }

    fn scratch(&self) -> Scratch {
        Scratch {
            backtrack: self.backtracker.create_cache(),
            pike: self.pikevm.create_cache(),
            hazards: self.hazards.iter().map(PikeVM::create_cache).collect(),
            caps: self.backtracker.create_captures(),
        }
    }

    /// Leftmost-first search of `subject[at..]`, leaving the groups in
    /// `scratch.caps`
    fn search(&self, scratch: &mut Scratch, subject: &[u8], at: usize) -> Result<(), Fault> {
        let input = self.input(subject, at);
        if input.get_span().len() <= self.backtracker.max_haystack_len() {
            self.backtracker
                .try_search(&mut scratch.backtrack, &input, &mut scratch.caps)
                .map_err(|err| Fault::new(ErrorCode::INTERNAL_ERROR, err.to_string()))?;
        } else {
            self.pikevm.search(&mut scratch.pike, &input, &mut scratch.caps);
        }
        if scratch.caps.is_match() {
            return Ok(());
        }
        self.charge_failure(scratch, &input)
    }

    /// Backtracking a failing search costs, checked against the budget
    fn charge_failure(&self, scratch: &mut Scratch, input: &Input<'_>) -> Result<(), Fault> {
        let run = self
            .hazards
            .iter()
            .zip(scratch.hazards.iter_mut())
            .filter_map(|(hazard, cache)| {
                hazard
                    .find_iter(cache, input.clone().anchored(Anchored::No))
                    .map(|found| found.len())
                    .max()
            })
            .max();
        let Some(run) = run else {
            return Ok(());
        };

        let steps = 2u64.saturating_pow(u32::try_from(run).unwrap_or(u32::MAX));
        let limit = u64::try_from(self.backtrack_limit).unwrap_or(u64::MAX);
        if steps > limit {
            log::debug!("failing search over a {run}-byte run needs about 2^{run} steps");
            return Err(Fault::new(
                ErrorCode::BACKTRACK_LIMIT_ERROR,
                format!(
                    "a failing search over a {run}-byte run of nested repetition exceeds {} backtracking steps",
                    self.backtrack_limit
                ),
            ));
        }
        Ok(())
    }
}

/// Default [`RegexEngine`]
#[derive(Debug, Clone, Default)]
pub struct BacktrackEngine {
    config: EngineConfig,
}

impl BacktrackEngine {
    /// Engine enforcing `config`
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any budget is out of range.
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn compile(&self, expression: &str) -> Result<Program, Fault> {
        let parsed = Expression::parse(expression).map_err(|err| {
            log::warn!("cannot compile {expression}: {err}");
            Fault::new(ErrorCode::INTERNAL_ERROR, err.to_string())
        })?;
        let modifiers = parsed.modifiers;

        let hir = regex_syntax::ParserBuilder::new()
            .nest_limit(self.config.recursion_limit)
            .case_insensitive(modifiers.case_insensitive)
            .multi_line(modifiers.multi_line)
            .dot_matches_new_line(modifiers.dot_all)
            .ignore_whitespace(modifiers.extended)
            .swap_greed(modifiers.ungreedy)
            .unicode(modifiers.unicode)
            .utf8(modifiers.unicode)
            .build()
            .parse(&parsed.body)
            .map_err(|err| {
                log::warn!("cannot compile {expression}: {err}");
                syntax_fault(&err)
            })?;

        let nfa = self.build_nfa(expression, &hir, modifiers.unicode)?;
        let backtracker = BoundedBacktracker::builder()
            .build_from_nfa(nfa.clone())
            .map_err(|err| Fault::new(ErrorCode::INTERNAL_ERROR, err.to_string()))?;
        let pikevm = PikeVM::new_from_nfa(nfa)
            .map_err(|err| Fault::new(ErrorCode::INTERNAL_ERROR, err.to_string()))?;

        let mut nested = Vec::new();
        collect_hazards(&hir, &mut nested);
        let hazards = nested
            .iter()
            .map(|hazard| {
                let nfa = self.build_nfa(expression, &strip_captures(hazard), modifiers.unicode)?;
                PikeVM::new_from_nfa(nfa)
                    .map_err(|err| Fault::new(ErrorCode::INTERNAL_ERROR, err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let names = backtracker
            .get_nfa()
            .group_info()
            .pattern_names(PatternID::ZERO)
            .map(|name| name.map(str::to_owned))
            .collect::<Vec<_>>();

        log::debug!(
            "compiled {expression} into {} states with {} groups and {} nested repetitions",
            backtracker.get_nfa().states().len(),
            names.len(),
            hazards.len()
        );

        Ok(Program {
            backtracker,
            pikevm,
            hazards,
            names,
            modifiers,
            backtrack_limit: self.config.backtrack_limit,
        })
    }

    fn build_nfa(&self, expression: &str, hir: &Hir, unicode: bool) -> Result<NFA, Fault> {
        thompson::Compiler::new()
            .configure(
                thompson::Config::new()
                    .utf8(unicode)
                    .nfa_size_limit(Some(self.config.jit_stack_limit)),
            )
            .build_from_hir(hir)
            .map_err(|err| match err.size_limit() {
                Some(limit) => {
                    log::warn!("{expression} exceeds the {limit} byte program budget");
                    Fault::new(
                        ErrorCode::JIT_STACKLIMIT_ERROR,
                        format!("compiled program exceeds {limit} bytes"),
                    )
                }
                None => Fault::new(ErrorCode::INTERNAL_ERROR, err.to_string()),
            })
    }

    fn run_match(
        &self,
        expression: &str,
        subject: &[u8],
        flags: MatchFlags,
        offset: usize,
    ) -> Result<MatchResult, Fault> {
        let program = self.compile(expression)?;
        check_subject(program.modifiers.unicode, subject, offset)?;

        let mut scratch = program.scratch();
        program.search(&mut scratch, subject, offset)?;

        if !scratch.caps.is_match() {
            return Ok(MatchResult::new());
        }
        Ok(single_groups(&program, &scratch.caps, subject, flags))
    }

    fn run_match_all(
        &self,
        expression: &str,
        subject: &[u8],
        flags: MatchFlags,
        offset: usize,
    ) -> Result<MatchAllResult, Fault> {
        let program = self.compile(expression)?;
        let unicode = program.modifiers.unicode;
        check_subject(unicode, subject, offset)?;

        let mut scratch = program.scratch();
        let mut spans = Vec::new();
        let mut at = offset;
        loop {
            program.search(&mut scratch, subject, at)?;
            let caps = &scratch.caps;
            let Some(found) = caps.get_match() else {
                break;
            };
            spans.push(
                (0..caps.group_len())
                    .map(|index| caps.get_group(index).map(|span| span.range()))
                    .collect::<Vec<_>>(),
            );

            at = if found.is_empty() {
                if found.end() >= subject.len() {
                    break;
                }
                found.end() + step_len(subject[found.end()], unicode)
            } else {
                found.end()
            };
        }

        if spans.is_empty() {
            return Ok(MatchAllResult::new());
        }

        let with_offset = flags.offset_capture();
        let as_null = flags.unmatched_as_null();
        let group_len = program.names.len();
        let mut groups = Groups::with_capacity(group_len);
        for index in 0..group_len {
            let column = spans
                .iter()
                .map(|occurrence| match occurrence.get(index).cloned().flatten() {
                    Some(span) => Capture::matched(subject, span, with_offset),
                    None => Capture::unmatched(as_null),
                })
                .collect::<Vec<_>>();
            if let Some(name) = program.name(index) {
                groups.insert(GroupKey::Name(name.to_owned()), column.clone());
            }
            groups.insert(GroupKey::Index(index), column);
        }
        Ok(groups)
    }
}

impl RegexEngine for BacktrackEngine {
    fn exec_match(
        &self,
        expression: &str,
        subject: &[u8],
        flags: MatchFlags,
        offset: usize,
    ) -> Exec<MatchResult> {
        match self.run_match(expression, subject, flags, offset) {
            Ok(data) => Exec::ok(data),
            Err(fault) => Exec::failed(fault.code, fault.detail),
        }
    }

    fn exec_match_all(
        &self,
        expression: &str,
        subject: &[u8],
        flags: MatchFlags,
        offset: usize,
    ) -> Exec<MatchAllResult> {
        match self.run_match_all(expression, subject, flags, offset) {
            Ok(data) => Exec::ok(data),
            Err(fault) => Exec::failed(fault.code, fault.detail),
        }
    }

    fn diagnostics(&self) -> &DiagnosticTable {
        &DIAGNOSTICS
    }
}

/// Groups of a single match; trailing unmatched groups are dropped unless
/// they are reported as null
fn single_groups(
    program: &Program,
    caps: &Captures,
    subject: &[u8],
    flags: MatchFlags,
) -> MatchResult {
    let as_null = flags.unmatched_as_null();
    let group_len = caps.group_len();
    let reported = if as_null {
        group_len
    } else {
        (0..group_len)
            .rev()
            .find(|&index| caps.get_group(index).is_some())
            .map_or(0, |last| last + 1)
    };

    let mut groups = Groups::with_capacity(reported);
    for index in 0..reported {
        let capture = match caps.get_group(index) {
            Some(span) => Capture::matched(subject, span.range(), flags.offset_capture()),
            None => Capture::unmatched(as_null),
        };
        if let Some(name) = program.name(index) {
            groups.insert(GroupKey::Name(name.to_owned()), capture.clone());
        }
        groups.insert(GroupKey::Index(index), capture);
    }
    groups
}

fn check_subject(unicode: bool, subject: &[u8], offset: usize) -> Result<(), Fault> {
    if unicode {
        if let Err(err) = simdutf8::compat::from_utf8(subject) {
            return Err(Fault::new(
                ErrorCode::BAD_UTF8_ERROR,
                format!("invalid UTF-8 sequence at byte {}", err.valid_up_to()),
            ));
        }
        if offset > subject.len() || !is_char_boundary(subject, offset) {
            return Err(Fault::new(
                ErrorCode::BAD_UTF8_OFFSET_ERROR,
                format!(
                    "offset {offset} is not a character boundary of a {}-byte subject",
                    subject.len()
                ),
            ));
        }
    } else if offset > subject.len() {
        return Err(Fault::new(
            ErrorCode::INTERNAL_ERROR,
            format!(
                "offset {offset} is past the end of a {}-byte subject",
                subject.len()
            ),
        ));
    }
    Ok(())
}

fn is_char_boundary(subject: &[u8], offset: usize) -> bool {
    subject
        .get(offset)
        .is_none_or(|&byte| byte & 0xC0 != 0x80)
}

/// Bytes to skip after an empty match starting with `lead`
fn step_len(lead: u8, unicode: bool) -> usize {
    if !unicode {
        return 1;
    }
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

fn syntax_fault(err: &regex_syntax::Error) -> Fault {
    let code = match err {
        regex_syntax::Error::Parse(parse) => match parse.kind() {
            regex_syntax::ast::ErrorKind::NestLimitExceeded(_) => ErrorCode::RECURSION_LIMIT_ERROR,
            _ => ErrorCode::INTERNAL_ERROR,
        },
        _ => ErrorCode::INTERNAL_ERROR,
    };
    Fault::new(code, err.to_string())
}

/// Outermost unbounded repetitions whose body holds another unbounded
/// repetition
fn collect_hazards(hir: &Hir, out: &mut Vec<Hir>) {
    match hir.kind() {
        HirKind::Repetition(rep) if rep.max.is_none() && has_unbounded_repetition(&rep.sub) => {
            out.push(hir.clone());
        }
        HirKind::Repetition(rep) => collect_hazards(&rep.sub, out),
        HirKind::Capture(cap) => collect_hazards(&cap.sub, out),
        HirKind::Concat(subs) | HirKind::Alternation(subs) => {
            for sub in subs {
                collect_hazards(sub, out);
            }
        }
        HirKind::Empty | HirKind::Literal(_) | HirKind::Class(_) | HirKind::Look(_) => {}
    }
}

fn has_unbounded_repetition(hir: &Hir) -> bool {
    match hir.kind() {
        HirKind::Repetition(rep) => rep.max.is_none() || has_unbounded_repetition(&rep.sub),
        HirKind::Capture(cap) => has_unbounded_repetition(&cap.sub),
        HirKind::Concat(subs) | HirKind::Alternation(subs) => {
            subs.iter().any(has_unbounded_repetition)
        }
        HirKind::Empty | HirKind::Literal(_) | HirKind::Class(_) | HirKind::Look(_) => false,
    }
}

/// `hir` with every capture group replaced by its body
fn strip_captures(hir: &Hir) -> Hir {
    match hir.kind() {
        HirKind::Capture(cap) => strip_captures(&cap.sub),
        HirKind::Repetition(rep) => Hir::repetition(Repetition {
            sub: Box::new(strip_captures(&rep.sub)),
            ..rep.clone()
        }),
        HirKind::Concat(subs) => Hir::concat(subs.iter().map(strip_captures).collect()),
        HirKind::Alternation(subs) => Hir::alternation(subs.iter().map(strip_captures).collect()),
        HirKind::Empty | HirKind::Literal(_) | HirKind::Class(_) | HirKind::Look(_) => hir.clone(),
    }
}
