use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Category keywords. English words are matched on word boundaries, Korean stems as substrings
    // because particles attach directly to them.
    pub static ref RE_HIT: Regex = Regex::new(r"(?i)\b(?:hits?|critical|crit|damages?|damaged|attacks?|attacked|strikes?|struck)\b|크리티컬|명중|데미지|공격").unwrap();
    pub static ref RE_MISS: Regex = Regex::new(r"(?i)\b(?:miss(?:es|ed)?|dodge[sd]?|evade[sd]?|evasion|block(?:s|ed)?|parr(?:y|ies|ied))\b|빗나감|회피|차단").unwrap();
    pub static ref RE_DEFEAT: Regex = Regex::new(r"(?i)\b(?:collaps(?:e|es|ed|ing)|(?:is|was|has been) defeated|slain|knocked out)\b|쓰러|패배").unwrap();
    pub static ref RE_REVIVAL: Regex = Regex::new(r"(?i)\b(?:reviv(?:e|es|ed|ing)|resurrect(?:s|ed|ion)?|second (?:chance|wind))\b|부활").unwrap();
    pub static ref RE_VICTORY: Regex = Regex::new(r"(?i)\b(?:wins|won|victory|victorious)\b|승리").unwrap();
    pub static ref RE_ROUND: Regex = Regex::new(r"===|^\s*---.*---\s*$").unwrap();

    // HP readings, in the order they are tried
    pub static ref RE_ARROW_HP: Regex = Regex::new(r"^(?P<source>.+?)\s*->\s*(?P<target>[^(]+?)\s*\(.*?(?i:remaining[\s-]*hp|남은\s*hp)\s*:?\s*(?P<hp>-?\d+)").unwrap();
    pub static ref RE_REVIVAL_HP: Regex = Regex::new(r"(?i)(?:reviv(?:e|es|ed|ing)|resurrect\w*|second (?:chance|wind)|부활).*?\bHP\s*:?\s*(?P<hp>-?\d+)").unwrap();
    pub static ref RE_PAREN_HP: Regex = Regex::new(r"\((?i:remaining[\s-]*hp|남은\s*hp|hp)\s*:\s*(?P<hp>-?\d+)\)").unwrap();

    // Consumables
    pub static ref RE_POTION_USED: Regex = Regex::new(r"(?:'s|’s|의)\s+(?P<potion>[^!]+?)\s+used!").unwrap();
    pub static ref RE_POTION_ACTIVATED: Regex = Regex::new(r"의\s+(?P<potion>[^!]+?)\s+발동!\s*\([A-Z_]+\)").unwrap();
}
