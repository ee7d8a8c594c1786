// Page shells for the guarded frontend routes. Layout, navigation chrome and
// styling are the frontend bundle's concern; the gateway only has to answer
// these paths so the route guard has something to protect.

use axum::response::Html;

const SHELL: &str = concat!(
    "<!doctype html>\n",
    "<html lang=\"pt-BR\">\n",
    "<head><meta charset=\"utf-8\"><title>MakeAPI</title></head>\n",
    "<body><div id=\"root\"></div></body>\n",
    "</html>\n",
);

pub async fn shell() -> Html<&'static str> {
    Html(SHELL)
}
