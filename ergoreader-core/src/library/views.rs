//! Derived views over the library collection

use crate::types::{Book, ALL_CATEGORIES, PDF_CATEGORY};

/// Category facet: "All", remote categories in first-seen order, then "PDF"
/// when the collection holds user records
pub fn categories(books: &[Book]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];

    for category in books
        .iter()
        .filter(|b| b.is_remote())
        .filter_map(Book::category)
    {
        if !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }

    if books.iter().any(Book::is_user) && !categories.iter().any(|c| c == PDF_CATEGORY) {
        categories.push(PDF_CATEGORY.to_string());
    }

    categories
}

/// Records in `category` (or any, for "All") whose title or author contains
/// `query`, preserving collection order
pub fn filtered<'a>(books: &'a [Book], query: &str, category: &str) -> Vec<&'a Book> {
    books
        .iter()
        .filter(|book| category == ALL_CATEGORIES || book.category() == Some(category))
        .filter(|book| book.matches_query(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Book> {
        vec![
            Book::remote("r1", "The Glass Meridian", "Ines Vale", "Fantasy", "S", "P"),
            Book::remote("r2", "Quiet Engines", "Tomas Reyes", "Science Fiction", "S", "P"),
            Book::remote("r3", "Ember Court", "Ines Vale", "Fantasy", "S", "P"),
            Book::user("u1", "tax-notes", "Uploaded File", "AAAA"),
        ]
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            categories(&sample()),
            vec!["All", "Fantasy", "Science Fiction", "PDF"]
        );
    }

    #[test]
    fn test_categories_without_user_records() {
        let books: Vec<Book> = sample().into_iter().filter(Book::is_remote).collect();
        assert_eq!(categories(&books), vec!["All", "Fantasy", "Science Fiction"]);
        assert_eq!(categories(&[]), vec!["All"]);
    }

    #[test]
    fn test_categories_pdf_not_duplicated() {
        let mut books = sample();
        books.push(Book::remote("r4", "Scans", "A", "PDF", "S", "P"));
        let categories = categories(&books);
        assert_eq!(categories.iter().filter(|c| *c == "PDF").count(), 1);
    }

    #[test]
    fn test_filtered_all() {
        let books = sample();
        assert_eq!(filtered(&books, "", "All").len(), books.len());
    }

    #[test]
    fn test_filtered_by_category_and_query() {
        let books = sample();

        let fantasy: Vec<_> = filtered(&books, "", "Fantasy").iter().map(|b| b.id.as_str()).collect();
        assert_eq!(fantasy, vec!["r1", "r3"]);

        let vale: Vec<_> = filtered(&books, "vale", "All").iter().map(|b| b.id.as_str()).collect();
        assert_eq!(vale, vec!["r1", "r3"]);

        let ember: Vec<_> = filtered(&books, "EMBER", "Fantasy").iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ember, vec!["r3"]);

        let pdfs: Vec<_> = filtered(&books, "", "PDF").iter().map(|b| b.id.as_str()).collect();
        assert_eq!(pdfs, vec!["u1"]);

        assert!(filtered(&books, "engines", "Fantasy").is_empty());
    }
}
