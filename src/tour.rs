//! A narrated tour of ownership, borrowing and smart pointers.
//!
//! Each lesson runs real code and records what happens in a [`Transcript`].
//! Types with a `Drop` impl narrate their own destruction, so the transcript
//! shows exactly when values are freed.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use log::debug;
use thiserror::Error;

/// Shared, append-only log of narration lines.
///
/// Clones append to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(&self, line: impl Into<String>) {
        let line = line.into();
        debug!("{}", line);
        self.lines.borrow_mut().push(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    /// Index of the first line equal to `line`.
    pub fn position(&self, line: &str) -> Option<usize> {
        self.lines.borrow().iter().position(|l| l == line)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown lesson '{0}'")]
pub struct UnknownLesson(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lesson {
    Borrowing,
    Optional,
    Immutability,
    Slices,
    Parameters,
    Heap,
    SmartPointers,
    Indirection,
    FunctionPointers,
    MethodChaining,
    Pitfalls,
    OwnedText,
}

impl Lesson {
    pub const ALL: [Lesson; 12] = [
        Lesson::Borrowing,
        Lesson::Optional,
        Lesson::Immutability,
        Lesson::Slices,
        Lesson::Parameters,
        Lesson::Heap,
        Lesson::SmartPointers,
        Lesson::Indirection,
        Lesson::FunctionPointers,
        Lesson::MethodChaining,
        Lesson::Pitfalls,
        Lesson::OwnedText,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Lesson::Borrowing => "borrowing",
            Lesson::Optional => "optional",
            Lesson::Immutability => "immutability",
            Lesson::Slices => "slices",
            Lesson::Parameters => "parameters",
            Lesson::Heap => "heap",
            Lesson::SmartPointers => "smart-pointers",
            Lesson::Indirection => "indirection",
            Lesson::FunctionPointers => "function-pointers",
            Lesson::MethodChaining => "method-chaining",
            Lesson::Pitfalls => "pitfalls",
            Lesson::OwnedText => "owned-text",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Lesson::Borrowing => "References and borrowing",
            Lesson::Optional => "Optional references instead of null",
            Lesson::Immutability => "Immutability",
            Lesson::Slices => "Slices and iteration",
            Lesson::Parameters => "Function parameters",
            Lesson::Heap => "Heap allocation",
            Lesson::SmartPointers => "Smart pointers",
            Lesson::Indirection => "Multiple indirection",
            Lesson::FunctionPointers => "Function pointers",
            Lesson::MethodChaining => "Methods, self and chaining",
            Lesson::Pitfalls => "Pitfalls the compiler rules out",
            Lesson::OwnedText => "An owned text type",
        }
    }

    fn number(&self) -> usize {
        Lesson::ALL
            .iter()
            .position(|lesson| lesson == self)
            .map_or(0, |index| index + 1)
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lesson {
    type Err = UnknownLesson;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lesson::ALL
            .into_iter()
            .find(|lesson| lesson.name() == s)
            .ok_or_else(|| UnknownLesson(s.to_string()))
    }
}

/// Runs the lessons in the given order; all of them when `lessons` is empty.
pub fn run(lessons: &[Lesson]) -> Transcript {
    let transcript = Transcript::new();
    let selected: &[Lesson] = if lessons.is_empty() { &Lesson::ALL } else { lessons };
    for lesson in selected {
        run_lesson(*lesson, &transcript);
    }
    transcript
}

pub fn run_lesson(lesson: Lesson, t: &Transcript) {
    t.say(format!("PART {}: {}", lesson.number(), lesson.title().to_uppercase()));
    match lesson {
        Lesson::Borrowing => borrowing(t),
        Lesson::Optional => optional(t),
        Lesson::Immutability => immutability(t),
        Lesson::Slices => slices(t),
        Lesson::Parameters => parameters(t),
        Lesson::Heap => heap(t),
        Lesson::SmartPointers => smart_pointers(t),
        Lesson::Indirection => indirection(t),
        Lesson::FunctionPointers => function_pointers(t),
        Lesson::MethodChaining => method_chaining(t),
        Lesson::Pitfalls => pitfalls(t),
        Lesson::OwnedText => owned_text(t),
    }
}

// =============================================================================
// Borrowing, Option, immutability
// =============================================================================

fn borrowing(t: &Transcript) {
    let mut number = 42;
    let another = 7;
    t.say(format!("number = {}", number));

    {
        let shared = &number;
        t.say(format!("shared reference reads {}", shared));
    }
    {
        let exclusive = &mut number;
        *exclusive = 100;
    }
    t.say(format!("after writing through &mut: number = {}", number));

    let mut view = &number;
    t.say(format!("view reads {}", view));
    view = &another;
    t.say(format!("view re-pointed, now reads {}", view));
    t.say(format!("number is unchanged: {}", number));
}

fn first_even(values: &[i32]) -> Option<&i32> {
    values.iter().find(|&&value| value % 2 == 0)
}

fn optional(t: &Transcript) {
    for values in [[1, 3, 4], [1, 3, 5]] {
        match first_even(&values) {
            Some(value) => t.say(format!("first even in {:?}: {}", values, value)),
            None => t.say(format!("first even in {:?}: none, nothing to dereference", values)),
        }
    }
    t.say("Option<&T> has no null state to forget to check");
}

fn immutability(t: &Transcript) {
    let limit = 10;
    let mut total = 0;
    let add_into = |sum: &mut i32, value: &i32| *sum += *value;

    add_into(&mut total, &limit);
    add_into(&mut total, &limit);
    t.say(format!("limit stays {}, total through &mut is {}", limit, total));
    t.say("many &T may coexist; a &mut T is exclusive while it lives");
}

// =============================================================================
// Slices and parameters
// =============================================================================

fn slices(t: &Transcript) {
    let values = [10, 20, 30, 40, 50];

    t.say(format!("elements 1..4: {:?}", &values[1..4]));

    let (head, tail) = values.split_at(2);
    t.say(format!("split_at(2): {:?} | {:?}", head, tail));

    let offset = values.iter().position(|&v| v == 40).unwrap_or(values.len());
    t.say(format!("distance from the start to 40: {}", offset));

    let walked: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    t.say(format!("walking to the end: {}", walked.join(" ")));
    t.say(format!("out of bounds get(10): {:?}", values.get(10)));
}

fn by_value(mut value: i32) -> i32 {
    value += 1;
    value
}

fn by_mut_ref(value: &mut i32) {
    *value *= 2;
}

fn by_ref(value: &i32) -> i32 {
    *value
}

fn larger<'a>(a: &'a mut i32, b: &'a mut i32) -> &'a mut i32 {
    if *a >= *b {
        a
    } else {
        b
    }
}

fn parameters(t: &Transcript) {
    let mut original = 5;
    let returned = by_value(original);
    t.say(format!("by value: returned {}, original still {}", returned, original));

    by_mut_ref(&mut original);
    t.say(format!("by &mut: original is now {}", original));

    t.say(format!("by &: read {}", by_ref(&original)));

    let mut other = 3;
    *larger(&mut original, &mut other) += 1;
    t.say(format!("through a returned &mut: original {}, other {}", original, other));
}

// =============================================================================
// Heap and smart pointers
// =============================================================================

/// Narrates its own lifetime.
struct Resource {
    name: &'static str,
    transcript: Transcript,
}

impl Resource {
    fn new(name: &'static str, transcript: &Transcript) -> Self {
        transcript.say(format!("Resource {} created", name));
        Resource {
            name,
            transcript: transcript.clone(),
        }
    }

    fn use_it(&self) {
        self.transcript.say(format!("Using {}", self.name));
    }
}

impl Drop for Resource {
    fn drop(&mut self) {
        self.transcript.say(format!("Resource {} destroyed", self.name));
    }
}

fn heap(t: &Transcript) {
    let single = Box::new(42);
    t.say(format!("boxed value: {}", single));

    let array: Vec<i32> = (0..5).map(|i| i * 10).collect();
    t.say(format!("heap array: {:?}", array));

    drop(single);
    t.say("box freed by drop(); naming it again would not compile");

    let resource = Resource::new("Scoped", t);
    resource.use_it();
    t.say(format!("{} elements and the resource are freed at end of scope", array.len()));
}

fn smart_pointers(t: &Transcript) {
    t.say("Box: exclusive ownership");
    {
        let first = Box::new(Resource::new("UniqueResource", t));
        first.use_it();
        let second = first;
        t.say("first moved into second; first can no longer be used");
        second.use_it();
    }

    t.say("Rc: shared ownership");
    {
        let first = Rc::new(Resource::new("SharedResource", t));
        t.say(format!("strong count: {}", Rc::strong_count(&first)));
        {
            let second = Rc::clone(&first);
            t.say(format!("strong count: {}", Rc::strong_count(&first)));
            second.use_it();
        }
        t.say(format!("strong count: {}", Rc::strong_count(&first)));
        first.use_it();
    }

    t.say("Weak: observe without owning");
    let observer: Weak<Resource>;
    {
        let owner = Rc::new(Resource::new("WeakObserved", t));
        observer = Rc::downgrade(&owner);
        if let Some(resource) = observer.upgrade() {
            resource.use_it();
        }
    }
    if observer.upgrade().is_none() {
        t.say("weak reference expired");
    }
}

// =============================================================================
// Indirection and function pointers
// =============================================================================

fn retarget<'a>(slot: &mut &'a i32, target: &'a i32) {
    *slot = target;
}

fn indirection(t: &Transcript) {
    let first = 1;
    let fallback = 999;
    let mut current = &first;
    t.say(format!("current reads {}", current));

    retarget(&mut current, &fallback);
    t.say(format!("after retarget(&mut current): current reads {}", current));

    let mut grid: Vec<Vec<i32>> = (0..3)
        .map(|row| (0..4).map(|col| row * 4 + col).collect())
        .collect();
    if let Some(cell) = grid.get_mut(1).and_then(|row| row.get_mut(2)) {
        *cell = -1;
    }
    t.say("grid after writing -1 through grid[1][2]:");
    for row in &grid {
        t.say(format!("  {:?}", row));
    }
}

fn add(a: i32, b: i32) -> i32 {
    a + b
}

fn multiply(a: i32, b: i32) -> i32 {
    a * b
}

fn subtract(a: i32, b: i32) -> i32 {
    a - b
}

fn function_pointers(t: &Transcript) {
    let operation: fn(i32, i32) -> i32 = add;
    t.say(format!("operation(10, 5) = {}", operation(10, 5)));

    let table: [(&str, fn(i32, i32) -> i32); 3] =
        [("add", add), ("multiply", multiply), ("subtract", subtract)];
    for (name, op) in table {
        t.say(format!("{}(7, 3) = {}", name, op(7, 3)));
    }

    let remainder: Box<dyn Fn(i32, i32) -> i32> = Box::new(|a, b| a % b);
    t.say(format!("boxed closure remainder(7, 3) = {}", remainder(7, 3)));
}

// =============================================================================
// Methods and an owned text type
// =============================================================================

/// Counter with a heap-held value and a registry of live instances.
struct Counter {
    count: Box<i32>,
    live: Rc<Cell<usize>>,
    transcript: Transcript,
}

impl Counter {
    fn new(initial: i32, live: &Rc<Cell<usize>>, transcript: &Transcript) -> Self {
        live.set(live.get() + 1);
        transcript.say(format!("Counter #{} created with value {}", live.get(), initial));
        Counter {
            count: Box::new(initial),
            live: Rc::clone(live),
            transcript: transcript.clone(),
        }
    }

    fn increment(&mut self) -> &mut Self {
        *self.count += 1;
        self
    }

    fn add(&mut self, value: i32) -> &mut Self {
        *self.count += value;
        self
    }

    /// Copies the value, keeping this counter's own allocation.
    fn assign(&mut self, other: &Counter) {
        *self.count = *other.count;
    }

    fn value(&self) -> i32 {
        *self.count
    }
}

impl Clone for Counter {
    fn clone(&self) -> Self {
        self.live.set(self.live.get() + 1);
        self.transcript.say(format!(
            "Counter #{} cloned with value {}",
            self.live.get(),
            self.count
        ));
        Counter {
            count: Box::new(*self.count),
            live: Rc::clone(&self.live),
            transcript: self.transcript.clone(),
        }
    }
}

impl Drop for Counter {
    fn drop(&mut self) {
        self.transcript
            .say(format!("Counter with value {} dropped", self.count));
        self.live.set(self.live.get().saturating_sub(1));
    }
}

fn method_chaining(t: &Transcript) {
    let live = Rc::new(Cell::new(0));
    {
        let mut c1 = Counter::new(10, &live, t);
        let mut c2 = Counter::new(20, &live, t);
        let c3 = c1.clone();

        c1.increment().add(5).increment();
        t.say(format!("after chaining: c1 = {}", c1.value()));
        t.say(format!("the clone kept its own value: c3 = {}", c3.value()));

        c2.assign(&c1);
        t.say(format!("after c2 = c1: c2 = {}", c2.value()));
        t.say(format!("live counters: {}", live.get()));
    }
    t.say(format!("live counters after scope: {}", live.get()));
}

fn pitfalls(t: &Transcript) {
    t.say("dangling reference: a borrow may not outlive its owner (E0597)");
    t.say("double free: each value is dropped once; use after move is E0382");
    t.say("uninitialized read: every binding is initialized before use (E0381)");

    t.say("leak: reassigning an owner frees the previous value");
    let mut slot = Resource::new("First", t);
    slot.use_it();
    slot = Resource::new("Second", t);
    slot.use_it();
}

/// Heap-held text that narrates clones and drops.
struct OwnedText {
    data: String,
    transcript: Transcript,
}

impl OwnedText {
    fn new(text: &str, transcript: &Transcript) -> Self {
        transcript.say(format!("OwnedText created: {:?}", text));
        OwnedText {
            data: text.to_string(),
            transcript: transcript.clone(),
        }
    }

    /// Replaces the character at `index`; false when out of range.
    fn set(&mut self, index: usize, ch: char) -> bool {
        let found = self.data.char_indices().nth(index);
        match found {
            Some((start, old)) => {
                self.data
                    .replace_range(start..start + old.len_utf8(), ch.encode_utf8(&mut [0; 4]));
                true
            }
            None => false,
        }
    }

    fn as_str(&self) -> &str {
        &self.data
    }
}

impl Clone for OwnedText {
    fn clone(&self) -> Self {
        self.transcript
            .say(format!("OwnedText cloned: {:?}", self.data));
        OwnedText {
            data: self.data.clone(),
            transcript: self.transcript.clone(),
        }
    }
}

impl Drop for OwnedText {
    fn drop(&mut self) {
        self.transcript
            .say(format!("OwnedText destroyed: {:?}", self.data));
    }
}

fn owned_text(t: &Transcript) {
    let s1 = OwnedText::new("Hello", t);
    let mut s2 = s1.clone();
    let s3 = OwnedText::new("World", t);

    if !s2.set(0, 'J') {
        t.say("index out of range");
    }
    t.say(format!("s1: {}", s1.as_str()));
    t.say(format!("s2: {}", s2.as_str()));

    let s4 = s3;
    t.say(format!("s3 moved into s4 without a copy: {}", s4.as_str()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(lesson: Lesson) -> Transcript {
        run(&[lesson])
    }

    #[test]
    fn test_lesson_names_round_trip() {
        for lesson in Lesson::ALL {
            assert_eq!(lesson.name().parse::<Lesson>(), Ok(lesson));
        }
        assert_eq!(
            "pointers".parse::<Lesson>(),
            Err(UnknownLesson("pointers".into()))
        );
    }

    #[test]
    fn test_run_without_selection_runs_all() {
        let transcript = run(&[]);
        assert!(transcript.position("PART 1: REFERENCES AND BORROWING").is_some());
        assert!(transcript.position("PART 12: AN OWNED TEXT TYPE").is_some());
    }

    #[test]
    fn test_transcript_clones_share_lines() {
        let t = Transcript::new();
        assert!(t.is_empty());

        let shared = t.clone();
        shared.say("one");
        t.say("two");
        assert_eq!(t.len(), 2);
        assert_eq!(shared.lines(), ["one", "two"]);
        assert_eq!(shared.position("two"), Some(1));
    }

    #[test]
    fn test_borrowing() {
        let t = lesson(Lesson::Borrowing);
        assert!(t.position("after writing through &mut: number = 100").is_some());
        assert!(t.position("view re-pointed, now reads 7").is_some());
    }

    #[test]
    fn test_parameters() {
        let t = lesson(Lesson::Parameters);
        assert!(t.position("by value: returned 6, original still 5").is_some());
        assert!(t.position("by &mut: original is now 10").is_some());
        assert!(t.position("through a returned &mut: original 11, other 3").is_some());
    }

    #[test]
    fn test_smart_pointer_lifetimes() {
        let t = lesson(Lesson::SmartPointers);
        let lines = t.lines();
        let counts: Vec<_> = lines
            .iter()
            .filter(|line| line.starts_with("strong count"))
            .map(String::as_str)
            .collect();
        assert_eq!(counts, ["strong count: 1", "strong count: 2", "strong count: 1"]);

        let destroyed = t.position("Resource UniqueResource destroyed").unwrap();
        assert!(destroyed < t.position("Rc: shared ownership").unwrap());
        assert!(
            t.position("Resource WeakObserved destroyed").unwrap()
                < t.position("weak reference expired").unwrap()
        );
    }

    #[test]
    fn test_indirection() {
        let t = lesson(Lesson::Indirection);
        assert!(t.position("after retarget(&mut current): current reads 999").is_some());
        assert!(t.position("  [4, 5, -1, 7]").is_some());
    }

    #[test]
    fn test_function_pointers() {
        let t = lesson(Lesson::FunctionPointers);
        assert!(t.position("multiply(7, 3) = 21").is_some());
        assert!(t.position("subtract(7, 3) = 4").is_some());
    }

    #[test]
    fn test_counters_are_deep_copies_and_all_dropped() {
        let t = lesson(Lesson::MethodChaining);
        assert!(t.position("after chaining: c1 = 17").is_some());
        assert!(t.position("the clone kept its own value: c3 = 10").is_some());
        assert!(t.position("after c2 = c1: c2 = 17").is_some());
        assert!(t.position("live counters: 3").is_some());
        assert!(t.position("live counters after scope: 0").is_some());
    }

    #[test]
    fn test_reassignment_frees_previous_value() {
        let t = lesson(Lesson::Pitfalls);
        let second_created = t.position("Resource Second created").unwrap();
        let first_destroyed = t.position("Resource First destroyed").unwrap();
        assert!(second_created < first_destroyed);
        assert_eq!(t.lines().last().map(String::as_str), Some("Resource Second destroyed"));
    }

    #[test]
    fn test_owned_text_moves_without_copy() {
        let t = lesson(Lesson::OwnedText);
        assert!(t.position("s1: Hello").is_some());
        assert!(t.position("s2: Jello").is_some());
        let destroyed = t
            .lines()
            .iter()
            .filter(|line| line.starts_with("OwnedText destroyed"))
            .count();
        assert_eq!(destroyed, 3);
    }
}
