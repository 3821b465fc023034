pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const DATABASE: &str = "🗄️";
    pub const NEW: &str = "✨";
    pub const LIST: &str = "📋";
    pub const EMPTY: &str = "∅";
}
