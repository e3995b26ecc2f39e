// View-models for the "friend suggestions" and "your friends" panels. Each
// panel owns its local state and the tasks loading it.
pub mod scope;
pub mod suggestions;
pub mod your_friends;
