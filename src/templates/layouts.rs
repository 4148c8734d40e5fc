//! Built-in page layouts, each a set of region overrides on the base skeleton

use super::{Block, BlockOverrides};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    Article,
    Page,
    Index,
    Category,
    Tag,
    Author,
    Categories,
    Tags,
    Authors,
    Archives,
}

const ARTICLE_HEAD: &str = r#"<meta name="description" content="{{ article.summary | striptags | trim | replace(from='"', to='&quot;') }}" />
{% if article.tags %}<meta name="keywords" content="{% for tag in article.tags %}{{ tag.name | replace(from='"', to='&quot;') }}{% if not loop.last %}, {% endif %}{% endfor %}" />
{% endif %}{% if article.author %}<meta name="author" content="{{ article.author.name | replace(from='"', to='&quot;') }}" />
{% endif %}"#;

const ARTICLE_CONTENT: &str = r#"<article>
  <header>
    <h2><a href="{{ SITEURL }}/{{ article.url }}" rel="bookmark">{{ article.title }}</a></h2>
    <p class="meta"><time datetime="{{ article.date_iso }}">{{ article.locale_date }}</time>{% if article.locale_modified %} (updated <time datetime="{{ article.modified_iso }}">{{ article.locale_modified }}</time>){% endif %} in <a href="{{ SITEURL }}/{{ article.category.url }}">{{ article.category.name }}</a>{% if article.author %} by <a href="{{ SITEURL }}/{{ article.author.url }}">{{ article.author.name }}</a>{% endif %}</p>
  </header>
  {{ article.content }}
{% if article.tags %}  <footer>
    <p class="tags">Tags: {% for tag in article.tags %}<a href="{{ SITEURL }}/{{ tag.url }}">{{ tag.name }}</a>{% if not loop.last %}, {% endif %}{% endfor %}</p>
  </footer>
{% endif %}</article>"#;

const PAGE_CONTENT: &str = r#"<article>
  <h2>{{ page.title }}</h2>
  {{ page.content }}
</article>"#;

const INDEX_CONTENT: &str = r#"{% include "article_list.html" %}"#;

const CATEGORY_CONTENT: &str = r#"<h2>Category: {{ category.name }}</h2>
{% include "article_list.html" %}"#;

const TAG_CONTENT: &str = r#"<h2>Tag: {{ tag.name }}</h2>
{% include "article_list.html" %}"#;

const AUTHOR_CONTENT: &str = r#"<h2>Articles by {{ author.name }}</h2>
{% include "article_list.html" %}"#;

const GROUPS_CONTENT: &str = r#"<ul class="groups">
{% for group in groups %}  <li><a href="{{ SITEURL }}/{{ group.url }}">{{ group.name }}</a> ({{ group.count }})</li>
{% endfor %}</ul>"#;

const ARCHIVES_CONTENT: &str = r#"<h2>Archives</h2>
<dl class="archives">
{% for article in articles %}  <dt><time datetime="{{ article.date_iso }}">{{ article.locale_date }}</time></dt>
  <dd><a href="{{ SITEURL }}/{{ article.url }}">{{ article.title }}</a></dd>
{% endfor %}</dl>"#;

impl Layout {
    pub const ALL: [Layout; 10] = [
        Layout::Article,
        Layout::Page,
        Layout::Index,
        Layout::Category,
        Layout::Tag,
        Layout::Author,
        Layout::Categories,
        Layout::Tags,
        Layout::Authors,
        Layout::Archives,
    ];

    /// Name the compiled layout is registered under
    pub fn template_name(self) -> &'static str {
        match self {
            Layout::Article => "article.html",
            Layout::Page => "page.html",
            Layout::Index => "index.html",
            Layout::Category => "category.html",
            Layout::Tag => "tag.html",
            Layout::Author => "author.html",
            Layout::Categories => "categories.html",
            Layout::Tags => "tags.html",
            Layout::Authors => "authors.html",
            Layout::Archives => "archives.html",
        }
    }

    pub fn overrides(self) -> BlockOverrides {
        let titled = |title: &str| {
            BlockOverrides::new().with(Block::Title, format!("{} — {{{{ SITENAME }}}}", title))
        };
        match self {
            Layout::Article => titled("{{ article.title }}")
                .with(Block::Head, ARTICLE_HEAD)
                .with(Block::Content, ARTICLE_CONTENT),
            Layout::Page => titled("{{ page.title }}").with(Block::Content, PAGE_CONTENT),
            Layout::Index => BlockOverrides::new().with(Block::Content, INDEX_CONTENT),
            Layout::Category => titled("{{ category.name }}").with(Block::Content, CATEGORY_CONTENT),
            Layout::Tag => titled("{{ tag.name }}").with(Block::Content, TAG_CONTENT),
            Layout::Author => titled("{{ author.name }}").with(Block::Content, AUTHOR_CONTENT),
            Layout::Categories => titled("Categories").with(
                Block::Content,
                format!("<h2>Categories</h2>\n{}", GROUPS_CONTENT),
            ),
            Layout::Tags => {
                titled("Tags").with(Block::Content, format!("<h2>Tags</h2>\n{}", GROUPS_CONTENT))
            }
            Layout::Authors => titled("Authors").with(
                Block::Content,
                format!("<h2>Authors</h2>\n{}", GROUPS_CONTENT),
            ),
            Layout::Archives => titled("Archives").with(Block::Content, ARCHIVES_CONTENT),
        }
    }
}
