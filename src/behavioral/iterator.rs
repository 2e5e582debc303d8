// Iterator
//
// Intent: traverse the elements of a collection without exposing how it is
// stored. Rust's `Iterator` trait is the pattern; these types implement it.

use std::cell::Cell;
use std::fmt;

use tracing::debug;

use crate::config::IteratorConfig;
use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordsCollection {
    items: Vec<String>,
    reverse: bool,
}

impl WordsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    pub fn reverse_direction(&mut self) {
        self.reverse = !self.reverse;
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> AlphabeticalOrderIterator<'_> {
        AlphabeticalOrderIterator {
            items: &self.items,
            front: 0,
            back: self.items.len(),
            reverse: self.reverse,
        }
    }
}

impl<'a> IntoIterator for &'a WordsCollection {
    type Item = &'a str;
    type IntoIter = AlphabeticalOrderIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks the collection in the direction it had when the iterator was made.
#[derive(Debug, Clone)]
pub struct AlphabeticalOrderIterator<'a> {
    items: &'a [String],
    front: usize,
    back: usize,
    reverse: bool,
}

impl<'a> Iterator for AlphabeticalOrderIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = if self.reverse {
            self.back -= 1;
            self.back
        } else {
            self.front += 1;
            self.front - 1
        };
        Some(self.items[index].as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AlphabeticalOrderIterator<'_> {}

pub fn conceptual_demo() -> Transcript {
    let mut collection = WordsCollection::new();
    collection.add_item("First");
    collection.add_item("Second");
    collection.add_item("Third");

    let mut out = Transcript::new();
    out.line("Straight traversal:");
    for element in &collection {
        out.line(element);
    }

    out.blank();
    out.line("Reverse traversal:");
    collection.reverse_direction();
    for element in &collection {
        out.line(element);
    }
    out
}

// ============================================================================
// Real-world example: social network spam
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub email: String,
}

impl Profile {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Friends,
    Coworkers,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Friends => write!(f, "friends"),
            Relation::Coworkers => write!(f, "coworkers"),
        }
    }
}

pub trait SocialNetwork {
    fn friends_iterator<'a>(&'a self, profile_id: &str) -> Box<dyn Iterator<Item = Profile> + 'a>;
    fn coworkers_iterator<'a>(&'a self, profile_id: &str) -> Box<dyn Iterator<Item = Profile> + 'a>;
}

#[derive(Debug, Default)]
pub struct Facebook {
    requests: Cell<usize>,
}

impl Facebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated network call.
    pub fn social_graph_request(&self, profile_id: &str, relation: Relation) -> Vec<Profile> {
        self.requests.set(self.requests.get() + 1);
        debug!(profile_id, %relation, "social graph request");
        let prefix = match relation {
            Relation::Friends => "friend",
            Relation::Coworkers => "coworker",
        };
        (1..=2)
            .map(|i| {
                Profile::new(
                    format!("{}{}", prefix, i),
                    format!("{}{}@example.com", prefix, i),
                )
            })
            .collect()
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl SocialNetwork for Facebook {
    fn friends_iterator<'a>(&'a self, profile_id: &str) -> Box<dyn Iterator<Item = Profile> + 'a> {
        Box::new(FacebookIterator::new(self, profile_id, Relation::Friends))
    }

    fn coworkers_iterator<'a>(&'a self, profile_id: &str) -> Box<dyn Iterator<Item = Profile> + 'a> {
        Box::new(FacebookIterator::new(self, profile_id, Relation::Coworkers))
    }
}

/// Fetches the profiles on the first call to `next`, not on creation.
pub struct FacebookIterator<'a> {
    facebook: &'a Facebook,
    profile_id: String,
    relation: Relation,
    cache: Option<std::vec::IntoIter<Profile>>,
}

impl<'a> FacebookIterator<'a> {
    pub fn new(facebook: &'a Facebook, profile_id: &str, relation: Relation) -> Self {
        Self {
            facebook,
            profile_id: profile_id.to_string(),
            relation,
            cache: None,
        }
    }
}

impl Iterator for FacebookIterator<'_> {
    type Item = Profile;

    fn next(&mut self) -> Option<Profile> {
        let facebook = self.facebook;
        let profile_id = &self.profile_id;
        let relation = self.relation;
        self.cache
            .get_or_insert_with(|| facebook.social_graph_request(profile_id, relation).into_iter())
            .next()
    }
}

#[derive(Debug, Default)]
pub struct SocialSpammer;

impl SocialSpammer {
    pub fn send(&self, profiles: impl Iterator<Item = Profile>, message: &str) -> Vec<String> {
        profiles
            .map(|p| format!("Sending email to {}: {}", p.email, message))
            .collect()
    }
}

pub struct SpamApplication<N> {
    network: N,
    spammer: SocialSpammer,
}

impl<N: SocialNetwork> SpamApplication<N> {
    pub fn new(network: N) -> Self {
        Self {
            network,
            spammer: SocialSpammer,
        }
    }

    pub fn send_spam_to_friends(&self, profile_id: &str, message: &str) -> Vec<String> {
        self.spammer
            .send(self.network.friends_iterator(profile_id), message)
    }

    pub fn send_spam_to_coworkers(&self, profile_id: &str, message: &str) -> Vec<String> {
        self.spammer
            .send(self.network.coworkers_iterator(profile_id), message)
    }

    pub fn network(&self) -> &N {
        &self.network
    }
}

pub fn real_world_demo(config: &IteratorConfig) -> Transcript {
    let app = SpamApplication::new(Facebook::new());
    let profile_id = config.profile_id.as_str();

    let mut out = Transcript::new();
    out.line("Sending messages to friends:");
    out.lines(app.send_spam_to_friends(profile_id, "Hello, friend! Check out our new promotion."));
    out.blank();
    out.line("Sending messages to coworkers:");
    out.lines(app.send_spam_to_coworkers(
        profile_id,
        "Hello, coworker! Don't forget our meeting at 3 PM.",
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn collection(words: &[&str]) -> WordsCollection {
        let mut c = WordsCollection::new();
        for w in words {
            c.add_item(*w);
        }
        c
    }

    #[test]
    fn test_straight_and_reverse_traversal() {
        let mut c = collection(&["First", "Second", "Third"]);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec!["First", "Second", "Third"]);

        c.reverse_direction();
        assert_eq!(c.iter().collect::<Vec<_>>(), vec!["Third", "Second", "First"]);
        assert_eq!(c.iter().len(), 3);
    }

    #[test]
    fn test_empty_collection() {
        let mut c = WordsCollection::new();
        assert_eq!(c.iter().next(), None);
        c.reverse_direction();
        assert_eq!(c.iter().next(), None);
    }

    #[test]
    fn test_facebook_iterator_is_lazy() {
        let facebook = Facebook::new();
        let mut iter = facebook.friends_iterator("user123");
        assert_eq!(facebook.requests(), 0);

        assert_eq!(iter.next().unwrap().email, "friend1@example.com");
        assert_eq!(iter.next().unwrap().id, "friend2");
        assert!(iter.next().is_none());
        assert_eq!(facebook.requests(), 1);
    }

    #[test]
    fn test_spam_goes_to_the_right_relation() {
        let app = SpamApplication::new(Facebook::new());
        let sent = app.send_spam_to_coworkers("user123", "meeting");
        assert_eq!(
            sent,
            vec![
                "Sending email to coworker1@example.com: meeting",
                "Sending email to coworker2@example.com: meeting",
            ]
        );
        assert_eq!(app.network().requests(), 1);
    }

    proptest! {
        #[test]
        fn prop_reverse_is_mirror_of_forward(words in prop::collection::vec("[a-z]{1,8}", 0..20)) {
            let mut c = WordsCollection::new();
            for w in &words {
                c.add_item(w.as_str());
            }
            let forward: Vec<String> = c.iter().map(str::to_string).collect();
            prop_assert_eq!(&forward, &words);

            c.reverse_direction();
            let mut backward: Vec<String> = c.iter().map(str::to_string).collect();
            backward.reverse();
            prop_assert_eq!(&backward, &words);

            c.reverse_direction();
            prop_assert!(!c.is_reversed());
        }
    }
}
