/// The waiting line for a single room.
///
/// Insertion order is wait order and a name appears at most once. The queue
/// does no locking of its own; `QueueRegistry` guards every access.
#[derive(Debug, Clone)]
pub struct RoomQueue {
    room: String,
    members: Vec<String>,
}

impl RoomQueue {
    pub fn new(room: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            members: Vec::new(),
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Appends `id` to the back of the line unless it is already waiting.
    /// Returns whether the line changed.
    pub fn join(&mut self, id: &str) -> bool {
        if self.members.iter().any(|m| m == id) {
            return false;
        }
        self.members.push(id.to_string());
        true
    }

    /// Removes `id` from the line, keeping everyone else in place.
    /// Returns whether the line changed.
    pub fn leave(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.members.iter().position(|m| m == id)
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.members.clone()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_appends_in_arrival_order() {
        let mut queue = RoomQueue::new("Physics");
        assert!(queue.join("ann"));
        assert!(queue.join("bo"));
        assert!(queue.join("cy"));

        assert_eq!(queue.snapshot(), vec!["ann", "bo", "cy"]);
        assert_eq!(queue.position("cy"), Some(2));
    }

    #[test]
    fn test_repeat_join_is_noop() {
        let mut queue = RoomQueue::new("Physics");
        assert!(queue.join("ann"));
        assert!(!queue.join("ann"));
        assert!(!queue.join("ann"));

        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_leave_middle_keeps_order() {
        let mut queue = RoomQueue::new("Physics");
        queue.join("ann");
        queue.join("bo");
        queue.join("cy");

        assert!(queue.leave("bo"));
        assert_eq!(queue.snapshot(), vec!["ann", "cy"]);
    }

    #[test]
    fn test_empty_after_last_leave() {
        let mut queue = RoomQueue::new("Mathematics");
        assert!(queue.is_empty());

        queue.join("ann");
        assert!(!queue.is_empty());

        queue.leave("ann");
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_leave_absent_is_noop() {
        let mut queue = RoomQueue::new("Biology");
        queue.join("ann");

        assert!(!queue.leave("zed"));
        assert_eq!(queue.snapshot(), vec!["ann"]);
    }

    #[test]
    fn test_rejoin_goes_to_back() {
        let mut queue = RoomQueue::new("Biology");
        queue.join("ann");
        queue.join("bo");
        queue.leave("ann");
        queue.join("ann");

        assert_eq!(queue.snapshot(), vec!["bo", "ann"]);
    }

    #[test]
    fn test_snapshot_does_not_alias() {
        let mut queue = RoomQueue::new("Chemistry");
        queue.join("ann");
        let before = queue.snapshot();
        queue.join("bo");

        assert_eq!(before, vec!["ann"]);
        assert_eq!(queue.len(), 2);
    }
}
