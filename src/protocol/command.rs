//! Command definitions
//!
//! A command is an ordered list of string arguments, first element the verb.
//! Constructors exist for every verb the client issues, so the verbs live in
//! one place instead of being scattered as literals through the call sites.

/// A store command: the verb plus its arguments, in wire order.
///
/// Always contains at least one element (the verb). Arguments are opaque
/// length-counted strings; the codec never needs to escape them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    args: Vec<String>,
}

impl Command {
    /// Start a command with the given verb
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            args: vec![verb.into()],
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The command verb (first element)
    pub fn verb(&self) -> &str {
        &self.args[0]
    }

    /// All elements in wire order
    pub fn parts(&self) -> &[String] {
        &self.args
    }

    // =========================================================================
    // Verb Constructors
    // =========================================================================

    pub fn set(key: &str, value: &str) -> Self {
        Self::new("set").arg(key).arg(value)
    }

    pub fn get(key: &str) -> Self {
        Self::new("get").arg(key)
    }

    pub fn mget<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("mget").args(keys)
    }

    pub fn sadd<I, S>(key: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("sadd").arg(key).args(members)
    }

    pub fn srem(key: &str, member: &str) -> Self {
        Self::new("srem").arg(key).arg(member)
    }

    pub fn sinter<I, S>(sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("sinter").args(sets)
    }

    pub fn sunion<I, S>(sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("sunion").args(sets)
    }

    pub fn zadd(key: &str, score: i64, member: &str) -> Self {
        Self::new("zadd").arg(key).arg(score.to_string()).arg(member)
    }

    /// `zadd` of several members, all at score zero. The zero score makes
    /// lexicographic member ordering drive range queries.
    pub fn zadd_zero_scored<I, S>(key: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cmd = Self::new("zadd").arg(key);
        for member in members {
            cmd = cmd.arg("0").arg(member);
        }
        cmd
    }

    pub fn zrem<I, S>(key: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("zrem").arg(key).args(members)
    }

    pub fn zrangebylex(key: &str, lower: &str, upper: &str) -> Self {
        Self::new("zrangebylex").arg(key).arg(lower).arg(upper)
    }

    pub fn hget(key: &str, field: &str) -> Self {
        Self::new("hget").arg(key).arg(field)
    }

    pub fn hset(key: &str, field: &str, value: &str) -> Self {
        Self::new("hset").arg(key).arg(field).arg(value)
    }

    pub fn hdel(key: &str, field: &str) -> Self {
        Self::new("hdel").arg(key).arg(field)
    }

    pub fn ping() -> Self {
        Self::new("ping")
    }

    // -------------------------------------------------------------------------
    // Transaction bracket
    // -------------------------------------------------------------------------

    /// Open a transaction bracket: subsequent commands are queued, not run.
    pub fn multi() -> Self {
        Self::new("multi")
    }

    /// Commit the bracket: queued commands execute atomically, in order.
    pub fn exec() -> Self {
        Self::new("exec")
    }

    /// Discard the bracket's queue.
    pub fn discard() -> Self {
        Self::new("discard")
    }
}
