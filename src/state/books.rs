use crate::types::book::Book;

/// An ordered, in-memory collection of books.
///
/// Books are kept in insertion order. Nothing is enforced on the stored
/// books: duplicated ISBNs and missing fields are accepted.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, book: Book) {
        self.books.push(book);
    }

    /// All books in insertion order.
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn find_first<P>(&self, mut predicate: P) -> Option<&Book>
    where
        P: FnMut(&Book) -> bool,
    {
        self.books.iter().find(|book| predicate(*book))
    }

    pub fn find_first_mut<P>(&mut self, mut predicate: P) -> Option<&mut Book>
    where
        P: FnMut(&Book) -> bool,
    {
        self.books.iter_mut().find(|book| predicate(&**book))
    }

    pub fn find_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&Book) -> bool,
    {
        self.books.iter().position(predicate)
    }

    /// Removes the book at `index`, shifting the following books down.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<Book> {
        (index < self.books.len()).then(|| self.books.remove(index))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl FromIterator<Book> for BookStore {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}
