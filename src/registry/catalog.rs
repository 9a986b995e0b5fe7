//! Built-in target catalogues.
//!
//! Pure data: building a catalogue never touches the network. Declaration
//! order here is the order `targets_for` returns.

use super::template::encode_identifier;
use super::types::{Category, ProbeTarget, RiskTier};

type Entry = (&'static str, Category, &'static str, RiskTier, &'static str);

const USERNAME_TARGETS: &[Entry] = &[
    ("GitHub", Category::Social, "https://github.com/{identifier}", RiskTier::Low, "Code & Projects"),
    ("Twitter", Category::Social, "https://twitter.com/{identifier}", RiskTier::Medium, "Social Activity"),
    ("Instagram", Category::Social, "https://instagram.com/{identifier}", RiskTier::Medium, "Photos & Stories"),
    ("LinkedIn", Category::Social, "https://linkedin.com/in/{identifier}", RiskTier::High, "Professional Info"),
    ("Facebook", Category::Social, "https://facebook.com/{identifier}", RiskTier::High, "Personal Details"),
    ("Reddit", Category::Social, "https://reddit.com/user/{identifier}", RiskTier::Medium, "Discussions & Interests"),
    ("TikTok", Category::Social, "https://tiktok.com/@{identifier}", RiskTier::Low, "Video Content"),
    ("AngelList", Category::Professional, "https://angel.co/u/{identifier}", RiskTier::High, "Startup Profile"),
    ("Behance", Category::Professional, "https://behance.net/{identifier}", RiskTier::Low, "Creative Portfolio"),
    ("Dribbble", Category::Professional, "https://dribbble.com/{identifier}", RiskTier::Low, "Design Work"),
    ("Medium", Category::Professional, "https://medium.com/@{identifier}", RiskTier::Medium, "Articles & Thoughts"),
    ("GitLab", Category::Development, "https://gitlab.com/{identifier}", RiskTier::Low, "Code Repositories"),
    ("Bitbucket", Category::Development, "https://bitbucket.org/{identifier}", RiskTier::Low, "Code Projects"),
    ("CodePen", Category::Development, "https://codepen.io/{identifier}", RiskTier::Low, "Code Snippets"),
    ("Stack Overflow", Category::Development, "https://stackoverflow.com/users/{identifier}", RiskTier::Low, "Technical Q&A"),
    ("Steam", Category::Gaming, "https://steamcommunity.com/id/{identifier}", RiskTier::Medium, "Gaming Profile"),
    ("Twitch", Category::Gaming, "https://twitch.tv/{identifier}", RiskTier::Medium, "Streaming Content"),
    ("Xbox", Category::Gaming, "https://xboxgamertag.com/search/{identifier}", RiskTier::Low, "Gaming Stats"),
    ("YouTube", Category::Content, "https://youtube.com/@{identifier}", RiskTier::Medium, "Video Content"),
    ("Vimeo", Category::Content, "https://vimeo.com/{identifier}", RiskTier::Low, "Video Portfolio"),
    ("SoundCloud", Category::Content, "https://soundcloud.com/{identifier}", RiskTier::Low, "Audio Content"),
];

const PERSON_TARGETS: &[Entry] = &[
    ("LinkedIn", Category::Professional, "https://www.linkedin.com/search/results/people/?keywords={identifier}", RiskTier::High, "Professional History"),
    ("AngelList", Category::Professional, "https://angel.co/search?query={identifier}", RiskTier::Medium, "Startup Involvement"),
    ("Crunchbase", Category::Professional, "https://www.crunchbase.com/search/people?query={identifier}", RiskTier::Medium, "Business Roles"),
    ("Facebook", Category::Social, "https://www.facebook.com/search/top?q={identifier}", RiskTier::High, "Personal Details"),
    ("Twitter", Category::Social, "https://twitter.com/search?q={identifier}", RiskTier::Medium, "Social Activity"),
    ("Instagram", Category::Social, "https://www.instagram.com/explore/search/keyword/?q={identifier}", RiskTier::Medium, "Photos & Stories"),
    ("Google News", Category::News, "https://news.google.com/search?q={identifier}", RiskTier::Low, "News Coverage"),
    ("CNN", Category::News, "https://www.cnn.com/search?q={identifier}", RiskTier::Low, "News Coverage"),
    ("BBC News", Category::News, "https://www.bbc.co.uk/search?q={identifier}", RiskTier::Low, "News Coverage"),
    ("Reuters", Category::News, "https://www.reuters.com/search/news?blob={identifier}", RiskTier::Low, "News Coverage"),
    ("Al Jazeera", Category::News, "https://www.aljazeera.com/search/{identifier}", RiskTier::Low, "News Coverage"),
    ("Associated Press", Category::News, "https://apnews.com/search?q={identifier}", RiskTier::Low, "News Coverage"),
    ("NYTimes", Category::News, "https://www.nytimes.com/search?query={identifier}", RiskTier::Low, "News Coverage"),
    ("Washington Post", Category::News, "https://www.washingtonpost.com/newssearch/?query={identifier}", RiskTier::Low, "News Coverage"),
    ("The Guardian", Category::News, "https://www.theguardian.com/search?q={identifier}", RiskTier::Low, "News Coverage"),
    ("Fox News", Category::News, "https://www.foxnews.com/search-results/search?q={identifier}", RiskTier::Low, "News Coverage"),
    ("Reddit", Category::Forums, "https://www.reddit.com/search/?q={identifier}", RiskTier::Medium, "Discussions"),
    ("Quora", Category::Forums, "https://www.quora.com/search?q={identifier}", RiskTier::Low, "Questions & Answers"),
    ("Stack Exchange", Category::Forums, "https://stackexchange.com/search?q={identifier}", RiskTier::Low, "Technical Q&A"),
    ("Medium", Category::Forums, "https://medium.com/search?q={identifier}", RiskTier::Low, "Articles"),
    ("Hackernews", Category::Forums, "https://hn.algolia.com/?q={identifier}", RiskTier::Low, "Discussions"),
    ("Discord Lookup", Category::Forums, "https://discordlookup.com/search?q={identifier}", RiskTier::Medium, "Chat Communities"),
    ("Google", Category::SearchEngines, "https://www.google.com/search?q=%22{identifier}%22", RiskTier::Low, "Web Mentions"),
    ("Bing", Category::SearchEngines, "https://www.bing.com/search?q=%22{identifier}%22", RiskTier::Low, "Web Mentions"),
    ("DuckDuckGo", Category::SearchEngines, "https://duckduckgo.com/?q=%22{identifier}%22", RiskTier::Low, "Web Mentions"),
    ("WhitePages", Category::PublicRecords, "https://www.whitepages.com/name/{identifier}", RiskTier::High, "Address & Phone"),
    ("Spokeo", Category::PublicRecords, "https://www.spokeo.com/search?q={identifier}", RiskTier::High, "People Records"),
    ("TruePeopleSearch", Category::PublicRecords, "https://www.truepeoplesearch.com/results?name={identifier}", RiskTier::High, "People Records"),
];

const EMAIL_SOCIAL_TARGETS: &[Entry] = &[
    ("Facebook", Category::Social, "https://facebook.com/search/people/?q={identifier}", RiskTier::High, "Linked Account"),
    ("Twitter", Category::Social, "https://twitter.com/search?q={identifier}", RiskTier::Medium, "Linked Account"),
    ("LinkedIn", Category::Professional, "https://www.linkedin.com/search/results/all/?keywords={identifier}", RiskTier::High, "Linked Account"),
    ("Instagram", Category::Social, "https://www.instagram.com/accounts/search/?q={identifier}", RiskTier::Medium, "Linked Account"),
    ("GitHub", Category::Development, "https://github.com/search?q={identifier}", RiskTier::Low, "Commit Identity"),
    ("Pinterest", Category::Social, "https://www.pinterest.com/search/users/?q={identifier}", RiskTier::Low, "Linked Account"),
    ("Medium", Category::Content, "https://medium.com/search?q={identifier}", RiskTier::Low, "Linked Account"),
    ("Quora", Category::Forums, "https://www.quora.com/search?q={identifier}", RiskTier::Low, "Linked Account"),
];

fn build(entries: &[Entry]) -> Vec<ProbeTarget> {
    entries
        .iter()
        .map(|(name, category, template, risk, info)| {
            ProbeTarget::new(*name, *category, *template, *risk, *info)
        })
        .collect()
}

pub(super) fn username_targets() -> Vec<ProbeTarget> {
    build(USERNAME_TARGETS)
}

pub(super) fn person_targets(location: Option<&str>) -> Vec<ProbeTarget> {
    let mut targets = build(PERSON_TARGETS);
    if let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) {
        let encoded = encode_identifier(location, true);
        for target in &mut targets {
            let separator = if target.url_template.contains('?') { '&' } else { '?' };
            target.url_template = format!("{}{}location={}", target.url_template, separator, encoded);
        }
    }
    targets
}

pub(super) fn email_social_targets() -> Vec<ProbeTarget> {
    build(EMAIL_SOCIAL_TARGETS)
}
