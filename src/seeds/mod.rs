pub mod books_seed;
