use std::time::Duration;

#[derive(Debug, Clone)]
struct Scheduled<K> {
    key: K,
    due: Duration,
    seq: u64,
}

/// Named, cancellable delayed tasks on a virtual clock advanced by frame
/// deltas. A task scheduled while another one fires is timed from the
/// firing task's due instant, not from the end of the frame.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    now: Duration,
    next_seq: u64,
    tasks: Vec<Scheduled<K>>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            tasks: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> Scheduler<K> {
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `key` to fire after `delay`. A pending task with the same
    /// key is replaced.
    pub fn schedule(&mut self, key: K, delay: Duration) {
        self.cancel(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(Scheduled {
            key,
            due: self.now + delay,
            seq,
        });
    }

    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.key != key);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    #[cfg(test)]
    pub fn is_pending(&self, key: K) -> bool {
        self.tasks.iter().any(|task| task.key == key)
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Removes and returns the earliest task due at or before `deadline`,
    /// moving the clock to its due instant.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<K> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= deadline)
            .min_by_key(|(_, task)| (task.due, task.seq))
            .map(|(index, _)| index)?;
        let task = self.tasks.remove(index);
        self.now = self.now.max(task.due);
        Some(task.key)
    }

    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Task {
        A,
        B,
        C,
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_in_due_order() {
        let mut sched = Scheduler::default();
        sched.schedule(Task::B, ms(200));
        sched.schedule(Task::A, ms(100));
        assert_eq!(sched.pop_due(ms(50)), None);
        assert_eq!(sched.pop_due(ms(300)), Some(Task::A));
        assert_eq!(sched.now(), ms(100));
        assert_eq!(sched.pop_due(ms(300)), Some(Task::B));
        assert_eq!(sched.pop_due(ms(300)), None);
        sched.settle(ms(300));
        assert_eq!(sched.now(), ms(300));
    }

    #[test]
    fn ties_fire_in_insertion_order() {
        let mut sched = Scheduler::default();
        sched.schedule(Task::C, ms(10));
        sched.schedule(Task::A, ms(10));
        assert_eq!(sched.pop_due(ms(10)), Some(Task::C));
        assert_eq!(sched.pop_due(ms(10)), Some(Task::A));
    }

    #[test]
    fn nested_tasks_are_relative_to_the_firing_instant() {
        let mut sched = Scheduler::default();
        sched.schedule(Task::A, ms(1000));
        // one long frame that overshoots the first task
        let deadline = ms(1050);
        assert_eq!(sched.pop_due(deadline), Some(Task::A));
        sched.schedule(Task::B, ms(3000));
        assert_eq!(sched.pop_due(deadline), None);
        sched.settle(deadline);
        assert_eq!(sched.pop_due(ms(3999)), None);
        assert_eq!(sched.pop_due(ms(4000)), Some(Task::B));
    }

    #[test]
    fn rescheduling_replaces_and_cancel_removes() {
        let mut sched = Scheduler::default();
        sched.schedule(Task::A, ms(10));
        sched.schedule(Task::A, ms(500));
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.pop_due(ms(100)), None);

        assert!(sched.cancel(Task::A));
        assert!(!sched.cancel(Task::A));
        assert!(!sched.is_pending(Task::A));

        sched.schedule(Task::B, ms(1));
        sched.schedule(Task::C, ms(2));
        sched.cancel_all();
        assert_eq!(sched.pop_due(ms(1000)), None);
    }
}
