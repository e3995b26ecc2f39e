pub const PROFILE_BY_ID_QUERY: &str =
    "SELECT id, name, preferences, college_year FROM profiles WHERE id = $1";

/// `&&` is the array overlap operator: true when both arrays share at least one element.
pub const PROFILES_WITH_ANY_PREFERENCE_QUERY: &str =
    "SELECT id, name, preferences, college_year FROM profiles WHERE preferences && $1 ORDER BY id";

pub const UPSERT_PROFILE_QUERY: &str =
    "INSERT INTO profiles (id, name, preferences, college_year) VALUES ($1, $2, $3, $4)
      ON CONFLICT (id) DO UPDATE
      SET name = EXCLUDED.name, preferences = EXCLUDED.preferences, college_year = EXCLUDED.college_year";

pub const USER_FRIEND_EDGES_QUERY: &str =
    "SELECT user1_id, user2_id FROM friends WHERE user1_id = $1 OR user2_id = $1 ORDER BY created_at";

/// Both directions of a pair share `pair_key`, so a second insert is a no-op.
pub const CREATE_FRIEND_EDGE_QUERY: &str =
    "INSERT INTO friends (id, user1_id, user2_id, pair_key) VALUES ($1, $2, $3, $4)
      ON CONFLICT (pair_key) DO NOTHING";

pub const PENDING_REQUESTS_BY_SENDER_QUERY: &str =
    "SELECT id, sender_id, receiver_id, status, created_at FROM friend_requests
      WHERE sender_id = $1 AND status = 'pending'
      ORDER BY created_at";

pub const CREATE_FRIEND_REQUEST_QUERY: &str =
    "INSERT INTO friend_requests (id, sender_id, receiver_id, status, created_at) VALUES ($1, $2, $3, $4, $5)";
