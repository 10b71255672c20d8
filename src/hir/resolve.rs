//! Symbol table and lazy, memoized resolution.
//!
//! # Architecture
//!
//! 1. **Registration** - every loaded [`SourceFile`] is wrapped in a
//!    [`FileDescriptor`] and each of its enums is registered under its
//!    `package.EnumName` key. Registration order is discovery order.
//! 2. **Resolution** - resolving a key resolves the owning file: its imports are
//!    resolved first (depth-first), then its enum bodies are extracted once and
//!    every member value is evaluated.
//! 3. **Memoization** - a resolved file is never extracted again; sibling enums
//!    of the same file come for free.
//!
//! Files reference each other only through table lookups, never directly.
//!
//! ## Import matching
//!
//! A reference `Q.MEMBER` is matched against the imports of the referring file.
//! An import `I` matches when it names the enum itself (`I == Q`), when it is a
//! qualified enum key ending in `Q` on a segment boundary, or when it names a
//! package that `Q` lives in (`Q` starts with `I.`). Matches are exact; two
//! distinct matching enums make the reference ambiguous.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::annotate::annotate;
use super::eval::{EvalError, Term, evaluate, parse_terms};
use super::symbols::{EnumDescriptor, EnumMember};
use crate::base::constants::DEFAULT_PROPERTY_ENUM;
use crate::base::text_utils::{ends_with_segments, split_last_segment, starts_with_segments};
use crate::base::{FileId, MetadataError, Result};
use crate::parser::{EnumBlock, MemberEntry};
use crate::syntax::SourceFile;

// ============================================================================
// OPTIONS
// ============================================================================

/// Settings that change how member values and names are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Enum whose member comments are parsed for titles and annotations.
    pub property_enum: String,
    /// Titles longer than this do not replace the member name.
    pub max_title_len: Option<usize>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            property_enum: DEFAULT_PROPERTY_ENUM.to_string(),
            max_title_len: None,
        }
    }
}

// ============================================================================
// FILE DESCRIPTOR
// ============================================================================

/// Resolution state of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveState {
    Unresolved,
    /// On the active resolution stack; meeting it again means a cycle.
    InProgress,
    Resolved,
}

/// One loaded file and, once resolved, its enums.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    source: SourceFile,
    state: ResolveState,
    enums: Vec<EnumDescriptor>,
}

impl FileDescriptor {
    fn new(source: SourceFile) -> Self {
        Self {
            source,
            state: ResolveState::Unresolved,
            enums: Vec::new(),
        }
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn state(&self) -> ResolveState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        self.state == ResolveState::Resolved
    }

    /// Resolved enums, empty until the file is resolved.
    pub fn enums(&self) -> &[EnumDescriptor] {
        &self.enums
    }

    /// Name used for this file in cycle reports: its first enum key.
    fn label(&self) -> String {
        self.source
            .enum_keys()
            .next()
            .unwrap_or_else(|| self.source.package().to_string())
    }
}

// ============================================================================
// SYMBOL TABLE
// ============================================================================

/// Location of a registered enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EnumSlot {
    file: FileId,
    /// Position among the file's enums.
    index: usize,
}

/// All files of a run, indexed by `package.EnumName`.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    files: Vec<FileDescriptor>,
    /// Key -> slot (IndexMap preserves discovery order).
    by_key: IndexMap<String, EnumSlot>,
    /// Package -> files declaring it.
    by_package: FxHashMap<String, Vec<FileId>>,
    options: ResolveOptions,
    extractions: usize,
    trace: Vec<String>,
}

impl SymbolTable {
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Register a file and every enum it declares.
    pub fn add_file(&mut self, source: SourceFile) -> Result<FileId> {
        let id = FileId::new(self.files.len() as u32);

        for key in source.enum_keys() {
            if let Some(existing) = self.by_key.get(&key) {
                return Err(MetadataError::DuplicateEnum {
                    key,
                    first: self.files[existing.file.index()].source.path().to_path_buf(),
                    second: source.path().to_path_buf(),
                });
            }
        }
        for (index, key) in source.enum_keys().enumerate() {
            self.by_key.insert(key, EnumSlot { file: id, index });
        }
        self.by_package
            .entry(source.package().to_string())
            .or_default()
            .push(id);

        debug!(
            file = %source.path().display(),
            package = source.package(),
            enums = source.enum_names().len(),
            "registered file"
        );
        self.files.push(FileDescriptor::new(source));
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Registered keys in discovery order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    pub fn file(&self, id: FileId) -> Option<&FileDescriptor> {
        self.files.get(id.index())
    }

    /// File that declares `key`.
    pub fn file_of(&self, key: &str) -> Option<&FileDescriptor> {
        self.by_key.get(key).map(|slot| &self.files[slot.file.index()])
    }

    /// Number of times enum bodies were extracted (once per resolved file).
    pub fn extraction_count(&self) -> usize {
        self.extractions
    }

    /// Keys in the order their values became final.
    pub fn resolution_trace(&self) -> &[String] {
        &self.trace
    }

    /// Resolved enum for `key`, or `None` if unknown or not yet resolved.
    pub fn enum_descriptor(&self, key: &str) -> Option<&EnumDescriptor> {
        let slot = self.by_key.get(key)?;
        let file = &self.files[slot.file.index()];
        if file.is_resolved() {
            file.enums.get(slot.index)
        } else {
            None
        }
    }

    /// Resolve `key` (and everything it depends on). Idempotent.
    pub fn resolve(&mut self, key: &str) -> Result<&EnumDescriptor> {
        let slot = *self
            .by_key
            .get(key)
            .ok_or_else(|| MetadataError::UnknownEnum(key.to_string()))?;

        self.resolve_file(slot.file, &mut Vec::new())?;
        Ok(&self.files[slot.file.index()].enums[slot.index])
    }

    /// Resolve every registered key in discovery order.
    pub fn resolve_all(&mut self) -> Result<()> {
        let files: Vec<FileId> = self.by_key.values().map(|slot| slot.file).collect();
        for file in files {
            self.resolve_file(file, &mut Vec::new())?;
        }
        Ok(())
    }

    /// Resolved enums in discovery order. Unresolved entries are skipped.
    pub fn descriptors(&self) -> impl Iterator<Item = &EnumDescriptor> {
        self.by_key.keys().filter_map(|key| self.enum_descriptor(key))
    }

    // ========================================================================
    // RESOLUTION
    // ========================================================================

    fn resolve_file(&mut self, id: FileId, stack: &mut Vec<FileId>) -> Result<()> {
        match self.files[id.index()].state {
            ResolveState::Resolved => return Ok(()),
            ResolveState::InProgress => return Err(self.cycle_error(id, stack)),
            ResolveState::Unresolved => {}
        }

        self.files[id.index()].state = ResolveState::InProgress;
        stack.push(id);

        let result = self.resolve_file_inner(id, stack);
        stack.pop();

        let file = &mut self.files[id.index()];
        match result {
            Ok(enums) => {
                file.enums = enums;
                file.state = ResolveState::Resolved;
                file.source.release_text();
                self.trace.extend(file.source.enum_keys());
                Ok(())
            }
            Err(e) => {
                file.state = ResolveState::Unresolved;
                Err(e)
            }
        }
    }

    fn resolve_file_inner(
        &mut self,
        id: FileId,
        stack: &mut Vec<FileId>,
    ) -> Result<Vec<EnumDescriptor>> {
        debug!(file = %self.files[id.index()].source.path().display(), "resolving");
        self.extractions += 1;
        let blocks = self.files[id.index()].source.extract_enums()?;

        for dependency in self.dependencies(id, &blocks) {
            self.resolve_file(dependency, stack)?;
        }
        self.evaluate_blocks(id, &blocks)
    }

    /// Files this file's imports point at, in import order, without itself.
    ///
    /// An import of the file's own package only contributes the files whose
    /// enums the member expressions actually reference.
    fn dependencies(&self, id: FileId, blocks: &[EnumBlock]) -> Vec<FileId> {
        let source = &self.files[id.index()].source;
        let mut dependencies = Vec::new();

        for import in source.imports() {
            let targets: Vec<FileId> = if let Some(slot) = self.by_key.get(import) {
                vec![slot.file]
            } else if import == source.package() {
                self.referenced_files(source, blocks)
            } else if let Some(files) = self.by_package.get(import) {
                files.clone()
            } else {
                debug!(
                    file = %source.path().display(),
                    import = import.as_str(),
                    "import names no known enum or package"
                );
                Vec::new()
            };

            for target in targets {
                if target != id && !dependencies.contains(&target) {
                    dependencies.push(target);
                }
            }
        }
        dependencies
    }

    /// Files declaring the enums that member expressions of `blocks` refer to.
    fn referenced_files(&self, source: &SourceFile, blocks: &[EnumBlock]) -> Vec<FileId> {
        blocks
            .iter()
            .flat_map(|block| &block.members)
            .filter_map(|entry| parse_terms(&entry.expression).ok())
            .flat_map(|parsed| parsed.terms)
            .filter_map(|signed| match signed.term {
                Term::Symbol(symbol) => Some(symbol),
                Term::Literal(_) => None,
            })
            .filter_map(|symbol| {
                let (qualifier, _) = split_last_segment(&symbol)?;
                let key = self.match_import(source, qualifier, &symbol).ok()?;
                self.by_key.get(&key).map(|slot| slot.file)
            })
            .collect()
    }

    fn cycle_error(&self, id: FileId, stack: &[FileId]) -> MetadataError {
        let start = stack.iter().position(|&f| f == id).unwrap_or(0);
        let mut cycle: Vec<String> = stack[start..]
            .iter()
            .map(|f| self.files[f.index()].label())
            .collect();
        cycle.push(self.files[id.index()].label());
        MetadataError::CyclicDependency { cycle }
    }

    // ========================================================================
    // EVALUATION
    // ========================================================================

    /// Evaluate every enum of a file, in as many passes as it takes for enums
    /// that reference enums declared later in the same file.
    fn evaluate_blocks(&self, id: FileId, blocks: &[EnumBlock]) -> Result<Vec<EnumDescriptor>> {
        let source = &self.files[id.index()].source;
        let keys: Vec<String> = blocks
            .iter()
            .map(|block| format!("{}.{}", source.package(), block.name))
            .collect();
        let mut done: Vec<Option<EnumDescriptor>> = vec![None; blocks.len()];

        loop {
            let mut progressed = false;
            let mut waits: Vec<Option<String>> = vec![None; blocks.len()];

            for (index, block) in blocks.iter().enumerate() {
                if done[index].is_some() {
                    continue;
                }
                match self.evaluate_block(source, block, &keys, &done)? {
                    BlockOutcome::Done(descriptor) => {
                        done[index] = Some(descriptor);
                        progressed = true;
                    }
                    BlockOutcome::Waiting(key) => waits[index] = Some(key),
                }
            }

            if waits.iter().all(Option::is_none) {
                break;
            }
            if !progressed {
                return Err(sibling_cycle(&keys, &waits));
            }
        }

        Ok(done.into_iter().flatten().collect())
    }

    fn evaluate_block(
        &self,
        source: &SourceFile,
        block: &EnumBlock,
        keys: &[String],
        done: &[Option<EnumDescriptor>],
    ) -> Result<BlockOutcome> {
        let is_property = block.name == self.options.property_enum;
        let mut current = EnumDescriptor::new(source.package(), block.name.as_str());
        let mut default_value: i64 = 0;

        for entry in &block.members {
            let mut waiting_on: Option<String> = None;
            let evaluated = evaluate(&entry.expression, default_value, |symbol| {
                self.lookup_symbol(source, keys, done, &current, symbol, &mut waiting_on)
            });
            let value = match evaluated {
                Ok(value) => value,
                Err(_) if waiting_on.is_some() => {
                    return Ok(BlockOutcome::Waiting(waiting_on.unwrap_or_default()));
                }
                Err(e) => return Err(self.evaluation_error(source, block, entry, e)),
            };

            trace!(
                enum_name = block.name.as_str(),
                member = entry.name.as_str(),
                expression = entry.expression.as_str(),
                value,
                "evaluated member"
            );

            let mut member = EnumMember::new(entry.name.as_str(), value);
            if let Some(comment) = entry.comment.as_ref().filter(|_| is_property) {
                member.apply_annotations(annotate(comment), self.options.max_title_len);
            }
            current.members.push(member);
            default_value = value.saturating_add(1);
        }

        Ok(BlockOutcome::Done(current))
    }

    /// Value of a dotted reference as seen from `source`.
    ///
    /// Enums of the file being resolved are visible through `done` (enums
    /// already evaluated, indexed like `keys`) and `current` (earlier members of
    /// the enum being evaluated). A reference to a sibling enum that is not
    /// evaluated yet sets `waiting_on` to its key.
    fn lookup_symbol(
        &self,
        source: &SourceFile,
        keys: &[String],
        done: &[Option<EnumDescriptor>],
        current: &EnumDescriptor,
        symbol: &str,
        waiting_on: &mut Option<String>,
    ) -> std::result::Result<i64, EvalError> {
        let (qualifier, member) = split_last_segment(symbol)
            .ok_or_else(|| EvalError::UnresolvedSymbol(symbol.to_string()))?;
        let key = self.match_import(source, qualifier, symbol)?;

        let descriptor = if key == current.key() {
            Some(current)
        } else if let Some(index) = keys.iter().position(|k| *k == key) {
            match &done[index] {
                Some(sibling) => Some(sibling),
                None => {
                    *waiting_on = Some(key);
                    return Err(EvalError::UnresolvedSymbol(symbol.to_string()));
                }
            }
        } else {
            self.enum_descriptor(&key)
        };

        descriptor
            .and_then(|d| d.member(member))
            .map(|m| m.value)
            .ok_or_else(|| EvalError::UnresolvedSymbol(format!("{key}.{member}")))
    }

    /// Enum key that `qualifier` refers to through the imports of `source`.
    fn match_import(
        &self,
        source: &SourceFile,
        qualifier: &str,
        symbol: &str,
    ) -> std::result::Result<String, EvalError> {
        let mut candidates: Vec<String> = Vec::new();

        for import in source.imports() {
            let key = if ends_with_segments(import, qualifier) {
                import.clone()
            } else if starts_with_segments(qualifier, import) {
                qualifier.to_string()
            } else {
                continue;
            };
            if !candidates.contains(&key) {
                candidates.push(key);
            }
        }

        match candidates.len() {
            0 => Err(EvalError::UnresolvedSymbol(symbol.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(EvalError::AmbiguousReference {
                symbol: symbol.to_string(),
                candidates,
            }),
        }
    }

    fn evaluation_error(
        &self,
        source: &SourceFile,
        block: &EnumBlock,
        entry: &MemberEntry,
        error: EvalError,
    ) -> MetadataError {
        let line = source.line_of(entry.offset);
        match error {
            EvalError::UnresolvedSymbol(symbol) => MetadataError::unresolved(
                symbol,
                format!(
                    "{}:{line}, enum `{}`, member `{}`, expression `{}`",
                    source.path().display(),
                    block.name,
                    entry.name,
                    entry.expression
                ),
            ),
            other => MetadataError::malformed(
                source.path(),
                line,
                format!(
                    "{other} in value of `{}` in enum `{}`: `{}`",
                    entry.name, block.name, entry.expression
                ),
            ),
        }
    }
}

/// Result of evaluating one enum of a file.
enum BlockOutcome {
    Done(EnumDescriptor),
    /// Blocked on a sibling enum (by key) that is not evaluated yet.
    Waiting(String),
}

/// Cycle among sibling enums that all wait on each other.
fn sibling_cycle(keys: &[String], waits: &[Option<String>]) -> MetadataError {
    let mut path: Vec<usize> = Vec::new();
    let mut index = waits.iter().position(Option::is_some).unwrap_or(0);

    while !path.contains(&index) {
        path.push(index);
        let next = waits[index]
            .as_ref()
            .and_then(|key| keys.iter().position(|k| k == key));
        match next {
            Some(next) => index = next,
            None => break,
        }
    }

    let start = path.iter().position(|&i| i == index).unwrap_or(0);
    let mut cycle: Vec<String> = path[start..].iter().map(|&i| keys[i].clone()).collect();
    cycle.push(keys[index].clone());
    MetadataError::CyclicDependency { cycle }
}
