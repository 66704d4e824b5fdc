//! Documents loaded into every new store.

use docsearch_core::types::Document;

/// The built-in document collection, in insertion order.
pub fn seed_documents() -> Vec<Document> {
    vec![
        Document::new(
            "doc1",
            "Machine learning is a subset of artificial intelligence that enables computers to learn and improve from experience without being explicitly programmed.",
            "Machine Learning Basics",
            "AI",
        ),
        Document::new(
            "doc2",
            "React is a JavaScript library for building user interfaces, particularly web applications. It uses a component-based architecture.",
            "React Introduction",
            "Web Development",
        ),
        Document::new(
            "doc3",
            "Vector databases are specialized databases designed to store and query high-dimensional vectors efficiently. They are crucial for AI applications.",
            "Vector Databases",
            "Database",
        ),
        Document::new(
            "doc4",
            "TypeScript is a strongly typed programming language that builds on JavaScript, giving you better tooling at any scale.",
            "TypeScript Overview",
            "Programming",
        ),
        Document::new(
            "doc5",
            "Oh, the Wellerman came to bring us sugar and tea and rum. One day, when the tonguin' is done, we'll take our leave and go. There once was a ship that put to sea, the name of the ship was the Billy of Tea. The winds blew up, her bow dipped down, oh blow, my bully boys, blow.",
            "The Wellerman Sea Shanty",
            "Maritime",
        ),
    ]
}
